//! Helpers to compose `!ficnotesbot` command lines for workflow tests.

/// `!ficnotesbot add story <name>`
pub fn add_story(name: &str) -> String {
    format!("!ficnotesbot add story {name}")
}

/// `!ficnotesbot add <kind> <name> > <story>`
pub fn add_element(kind: &str, name: &str, story: &str) -> String {
    format!("!ficnotesbot add {kind} {name} > {story}")
}

/// `!ficnotesbot add plotpoint "<index>" <header> > <story>`
pub fn add_plotpoint(index: &str, header: &str, story: &str) -> String {
    format!("!ficnotesbot add plotpoint \"{index}\" {header} > {story}")
}

/// `!ficnotesbot add note <text> > <element> > <story>`
pub fn add_note(text: &str, element: &str, story: &str) -> String {
    format!("!ficnotesbot add note {text} > {element} > {story}")
}

/// `!ficnotesbot list stories`
pub fn list_stories() -> String {
    "!ficnotesbot list stories".to_string()
}
