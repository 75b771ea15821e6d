use crate::constants::routing::EXPRESSION_PREFIX;
use crate::utils::placeholders::canonicalize;
use crate::utils::text::strip_expression_prefix;
use once_cell::sync::Lazy;
use regex::Regex;

type LabelFn = fn(&str) -> String;

fn pick(method: &str, known: &[(&str, &str)], noun: &str) -> String {
    known
        .iter()
        .find(|(m, _)| *m == method)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| format!("{} {}", method, noun))
}

fn list_or_create(method: &str, plural: &str, singular: &str) -> String {
    if method == "GET" {
        format!("List {}", plural)
    } else {
        format!("Create {}", singular)
    }
}

fn rule(pattern: &'static str, label: LabelFn) -> (&'static str, LabelFn) {
    (pattern, label)
}

static OPERATION_METHOD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(GET|POST|PUT|PATCH|DELETE)\s+(.+)$").expect("operation regex"));

static LABELS: Lazy<Vec<(Regex, LabelFn)>> = Lazy::new(|| {
    let table = vec![
        // objects
        rule(r"^/v2/objects$", |m: &str| list_or_create(m, "Objects", "Object")),
        rule(r"^/v2/objects/\{object\}$", |m: &str| {
            pick(
                m,
                &[
                    ("GET", "Get Object"),
                    ("PATCH", "Update Object"),
                    ("DELETE", "Delete Object"),
                ],
                "Object",
            )
        }),
        // records
        rule(r"^/v2/objects/\{object\}/records/query$", |_: &str| "List Records".to_string()),
        rule(r"^/v2/objects/\{object\}/records$", |m: &str| {
            pick(m, &[("POST", "Create Record"), ("PUT", "Assert Record")], "Records")
        }),
        rule(r"^/v2/objects/\{object\}/records/\{record_id\}$", |m: &str| {
            pick(
                m,
                &[
                    ("GET", "Get Record"),
                    ("PUT", "Update Record (Overwrite)"),
                    ("PATCH", "Update Record (Append)"),
                    ("DELETE", "Delete Record"),
                ],
                "Record",
            )
        }),
        rule(r"^/v2/objects/\{object\}/records/\{record_id\}/attributes$", |_: &str| {
            "List Record Attributes".to_string()
        }),
        rule(r"^/v2/objects/\{object\}/records/\{record_id\}/entries$", |_: &str| {
            "List Record Entries".to_string()
        }),
        // attributes
        rule(r"^/v2/\{target\}/\{identifier\}/attributes$", |m: &str| {
            list_or_create(m, "Attributes", "Attribute")
        }),
        rule(r"^/v2/\{target\}/\{identifier\}/attributes/\{attribute\}$", |m: &str| {
            pick(
                m,
                &[
                    ("GET", "Get Attribute"),
                    ("PATCH", "Update Attribute"),
                    ("DELETE", "Delete Attribute"),
                ],
                "Attribute",
            )
        }),
        // lists
        rule(r"^/v2/lists$", |m: &str| list_or_create(m, "Lists", "List")),
        rule(r"^/v2/lists/\{list\}$", |m: &str| {
            pick(m, &[("GET", "Get List"), ("DELETE", "Delete List")], "List")
        }),
        // entries
        rule(r"^/v2/lists/\{list\}/entries/query$", |_: &str| "List Entries".to_string()),
        rule(r"^/v2/lists/\{list\}/entries$", |_: &str| "Create Entry".to_string()),
        rule(r"^/v2/lists/\{list\}/entries/\{entry_id\}$", |m: &str| {
            pick(
                m,
                &[
                    ("GET", "Get Entry"),
                    ("PUT", "Update Entry (Overwrite)"),
                    ("PATCH", "Update Entry (Append)"),
                    ("DELETE", "Delete Entry"),
                ],
                "Entry",
            )
        }),
        rule(r"^/v2/lists/\{list\}/entries/\{entry_id\}/attributes$", |_: &str| {
            "List Entry Attributes".to_string()
        }),
        // workspace members
        rule(r"^/v2/workspace_members$", |_: &str| "List Workspace Members".to_string()),
        rule(r"^/v2/workspace_members/\{workspace_member_id\}$", |_: &str| {
            "Get Workspace Member".to_string()
        }),
        // notes
        rule(r"^/v2/notes$", |m: &str| list_or_create(m, "Notes", "Note")),
        rule(r"^/v2/notes/\{note_id\}$", |m: &str| {
            pick(m, &[("GET", "Get Note"), ("DELETE", "Delete Note")], "Note")
        }),
        // tasks
        rule(r"^/v2/tasks$", |m: &str| list_or_create(m, "Tasks", "Task")),
        rule(r"^/v2/tasks/\{task_id\}$", |m: &str| {
            pick(
                m,
                &[
                    ("GET", "Get Task"),
                    ("PATCH", "Update Task"),
                    ("DELETE", "Delete Task"),
                ],
                "Task",
            )
        }),
        // comments
        rule(r"^/v2/threads/\{thread_id\}/comments$", |m: &str| {
            list_or_create(m, "Comments", "Comment")
        }),
        rule(r"^/v2/comments/\{comment_id\}$", |m: &str| {
            pick(m, &[("GET", "Get Comment"), ("DELETE", "Delete Comment")], "Comment")
        }),
        // webhooks
        rule(r"^/v2/webhooks$", |m: &str| list_or_create(m, "Webhooks", "Webhook")),
        rule(r"^/v2/webhooks/\{webhook_id\}$", |m: &str| {
            pick(
                m,
                &[
                    ("GET", "Get Webhook"),
                    ("PATCH", "Update Webhook"),
                    ("DELETE", "Delete Webhook"),
                ],
                "Webhook",
            )
        }),
        rule(r"^/v2/self$", |_: &str| "Get Current User".to_string()),
    ];
    table
        .into_iter()
        .map(|(pattern, label)| (Regex::new(pattern).expect("label regex"), label))
        .collect()
});

/// Friendly label for an operation named `"<METHOD> <path>"`.
///
/// Names not shaped like that are returned unchanged.
pub fn friendly_operation_name(name: &str) -> String {
    let Some(caps) = OPERATION_METHOD.captures(name.trim()) else {
        return name.to_string();
    };
    let (Some(method), Some(path)) = (caps.get(1), caps.get(2)) else {
        return name.to_string();
    };
    let method = method.as_str();
    let path = canonicalize(path.as_str().trim());
    let path = strip_expression_prefix(&path, EXPRESSION_PREFIX);

    for (pattern, label) in LABELS.iter() {
        if pattern.is_match(path) {
            return label(method);
        }
    }

    let cleaned: String = path
        .strip_prefix("/v2/")
        .unwrap_or(path)
        .chars()
        .filter(|c| *c != '{' && *c != '}')
        .collect();
    format!("{} {}", method, cleaned)
}

/// Label for a routing entry's method and URL template.
pub fn label_for(method: &str, url_template: &str) -> String {
    friendly_operation_name(&format!(
        "{} {}",
        method.trim().to_uppercase(),
        url_template.trim()
    ))
}
