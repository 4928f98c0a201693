/// Help text entries, kept sorted like `dokku help` prints them.
///
/// Dokku relays a plugin's help verbatim; the four-space indent lines the
/// entries up with the core commands.
const COMMANDS: &[(&str, &str)] = &[
    (
        "arangodb-plugin:create <app> [service]",
        "Create an ArangoDB container for an app",
    ),
    (
        "arangodb-plugin:delete <app>",
        "Delete the ArangoDB container and its data",
    ),
    ("arangodb-plugin:help", "Display this help"),
    (
        "arangodb-plugin:info <app>",
        "Show connection details for the container",
    ),
    (
        "arangodb-plugin:link <app>",
        "Link an app to its ArangoDB container",
    ),
    ("arangodb-plugin:test", "Print a wiring test line"),
    (
        "arangodb-plugin:unlink <app>",
        "Unlink an app from its ArangoDB container",
    ),
];

pub(super) fn render() -> String {
    let width = COMMANDS
        .iter()
        .map(|(usage, _)| usage.len())
        .max()
        .unwrap_or(0);

    let mut out = String::from("Manage ArangoDB service containers\n\nAdditional commands:");
    for (usage, description) in COMMANDS {
        out.push('\n');
        out.push_str(&format!("    {usage:<width$}  {description}"));
    }
    out
}
