//! Field-to-placeholder mappings for each template variant.
//!
//! Placeholders are `{{NAME}}` tokens. Every occurrence of a mapped token is
//! replaced in a single pass, so substituted values are never re-scanned.
//! Tokens without a mapping are kept verbatim.

use apprelay_domain::{
    ApprovalSubject, CreateDesktopContents, DesktopContents, ExternalAccessContents,
    PendingApproval,
};

/// Separator placed between repeated row fragments.
#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";

/// Separator placed between repeated row fragments.
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

const NOT_ENTERED: &str = "입력되지않음";

const OWN_DESKTOP_ROW: &str = r#"              <tr>
                <td scope="col">{{VD_NAME}}</td>
                <td scope="col">{{VD_GROUP}}</td>
                <td scope="col">{{VD_OS}}</td>
                <td scope="col">{{FLAVOR_NAME}}</td>
                <td scope="col">{{DISK}}GB</td>
                <td scope="col" class="last">{{CREATE_DATE}}</td>
              </tr>"#;

type Substitutions = Vec<(&'static str, String)>;

pub(super) fn render_subject(
    template: &str,
    approval: &PendingApproval,
    subject: &ApprovalSubject,
) -> String {
    let mut values: Substitutions = vec![
        ("REASON", approval.reason.clone()),
        ("USER", approval.target_user_label()),
    ];

    match subject {
        ApprovalSubject::CreateDesktop(contents) => {
            create_desktop_values(&mut values, approval, contents);
        }
        ApprovalSubject::DeleteDesktop(contents) => {
            desktop_values(&mut values, DELETE_PLACEHOLDERS, contents);
        }
        ApprovalSubject::ResetDesktop(contents) => {
            desktop_values(&mut values, RESET_PLACEHOLDERS, contents);
            values.push(("EXEC_DATE", execution_date(approval)));
        }
        ApprovalSubject::ExternalAccess(contents) => {
            external_access_values(&mut values, contents);
        }
    }

    substitute(template, &values)
}

fn create_desktop_values(
    values: &mut Substitutions,
    approval: &PendingApproval,
    contents: &CreateDesktopContents,
) {
    let rows = contents
        .own_desktop
        .iter()
        .map(owned_desktop_row)
        .collect::<Vec<_>>()
        .join(LINE_SEPARATOR);

    values.extend([
        ("OWN_DESKTOP", rows),
        ("NEW_VD_VDG_NAME", contents.vd_group_name.clone()),
        ("NEW_VD_FLAVOR", contents.flavor_name.clone()),
        ("NEW_VD_DISK", contents.disk.to_string()),
        ("NEW_VD_EXP", contents.expiration_date.clone()),
        ("EXEC_DATE", execution_date(approval)),
    ]);
}

fn owned_desktop_row(desktop: &DesktopContents) -> String {
    let values: Substitutions = vec![
        ("VD_NAME", desktop.vd_name.clone()),
        ("VD_GROUP", desktop.vd_group_name.clone()),
        ("VD_OS", desktop.os.clone()),
        ("FLAVOR_NAME", desktop.flavor_name.clone()),
        ("DISK", desktop.disk.to_string()),
        ("CREATE_DATE", desktop.create_date.clone()),
    ];
    substitute(OWN_DESKTOP_ROW, &values)
}

const DELETE_PLACEHOLDERS: [&str; 6] = [
    "DELETE_VD_NAME",
    "DELETE_VD_GROUP",
    "DELETE_VD_OS",
    "DELETE_VD_FLAVOR",
    "DELETE_VD_DISK",
    "DELETE_VD_CRETED_AT",
];

const RESET_PLACEHOLDERS: [&str; 6] = [
    "RESET_VD_NAME",
    "RESET_VD_GROUP",
    "RESET_VD_OS",
    "RESET_VD_FLAVOR",
    "RESET_VD_DISK",
    "RESET_VD_CRETED_AT",
];

// `CRETED_AT` is spelled the way the deployed template files spell it.
fn desktop_values(
    values: &mut Substitutions,
    names: [&'static str; 6],
    contents: &DesktopContents,
) {
    let fields = [
        contents.vd_name.clone(),
        contents.vd_group_name.clone(),
        contents.os.clone(),
        contents.flavor_name.clone(),
        contents.disk.to_string(),
        contents.create_date.clone(),
    ];
    values.extend(names.into_iter().zip(fields));
}

fn external_access_values(values: &mut Substitutions, contents: &ExternalAccessContents) {
    values.extend([
        ("START_DATE", contents.start_date.clone()),
        ("END_DATE", contents.end_date.clone()),
    ]);
}

fn execution_date(approval: &PendingApproval) -> String {
    approval
        .scheduled_at
        .as_deref()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or(NOT_ENTERED)
        .to_owned()
}

pub(super) fn substitute(template: &str, values: &[(&'static str, String)]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);
        let token = &rest[start..];

        let Some(end) = token[2..].find("}}") else {
            output.push_str(token);
            return output;
        };

        let name = &token[2..2 + end];
        if name.contains("{{") {
            // Stray opening braces; keep them and rescan from the next token.
            output.push_str("{{");
            rest = &token[2..];
            continue;
        }

        match values.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => output.push_str(value),
            None => output.push_str(&token[..end + 4]),
        }
        rest = &token[end + 4..];
    }

    output.push_str(rest);
    output
}
