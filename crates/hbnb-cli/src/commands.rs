//! Built-in help.

/// Help topics with their documentation.
const TOPICS: &[(&str, &str)] = &[
    ("EOF", "Cleanly exit the program."),
    (
        "all",
        "Prints all string representation of all instances based or not on\n\
         the class name.\n\
         \n\
         Usage: all [<class>]  |  <class>.all()",
    ),
    (
        "count",
        "Prints the number of instances of a class.\n\
         \n\
         Usage: count <class>  |  <class>.count()",
    ),
    (
        "create",
        "Creates a new instance of a class, saves it to the JSON file\n\
         and prints the id.\n\
         \n\
         Usage: create <class>",
    ),
    (
        "destroy",
        "Deletes an instance based on the class name and id.\n\
         Changes are saved into the JSON file.\n\
         \n\
         Usage: destroy <class> <id>  |  <class>.destroy(<id>)",
    ),
    ("help", "List available commands with \"help\" or detailed help with \"help cmd\"."),
    ("quit", "Exits the program."),
    (
        "show",
        "Prints the string representation of an instance based on the class\n\
         name and id.\n\
         \n\
         Usage: show <class> <id>  |  <class>.show(<id>)",
    ),
    (
        "update",
        "Updates an instance based on the class name and id by adding or\n\
         updating an attribute. Saves the change into the JSON file.\n\
         \n\
         Usage: update <class> <id> <attribute> \"<value>\"\n\
         \x20      <class>.update(<id>, <attribute>, <value>)\n\
         \x20      <class>.update(<id>, <dictionary>)",
    ),
];

/// Names of every help topic, in listing order.
pub fn topics() -> impl Iterator<Item = &'static str> {
    TOPICS.iter().map(|(name, _)| *name)
}

/// Render `help` or `help <topic>`.
pub fn help(topic: Option<&str>) -> String {
    match topic {
        None => overview(),
        Some(name) => TOPICS
            .iter()
            .find(|(t, _)| *t == name)
            .map(|(_, doc)| doc.to_string())
            .unwrap_or_else(|| format!("*** No help on {}", name)),
    }
}

fn overview() -> String {
    let header = "Documented commands (type help <topic>):";
    format!(
        "\n{}\n{}\n{}\n",
        header,
        "=".repeat(header.len()),
        topics().collect::<Vec<_>>().join("  ")
    )
}
