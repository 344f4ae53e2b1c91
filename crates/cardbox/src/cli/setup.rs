use cardboxapp::form::FormField;
use cardboxapp::model::SortKey;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "cardbox",
    bin_name = "cardbox",
    version,
    disable_help_flag = true,
    disable_help_subcommand = true
)]
#[command(about = "Recipe cards from the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to $CARDBOX_DATA or the OS data directory)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Print help
    #[arg(short, long, global = true)]
    pub help: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List recipes
    #[command(alias = "ls")]
    List {
        /// Sort order for this listing (alphabetical, person, source, date)
        #[arg(short, long)]
        sort: Option<SortKey>,
    },

    /// Print a saved recipe as a card
    Show {
        /// List position, id or title
        recipe: String,
    },

    /// Start a blank form
    #[command(alias = "clear")]
    New,

    /// Load a saved recipe into the form
    Open {
        /// List position, id or title
        recipe: String,
    },

    /// Show the form and its undo position
    Form,

    /// Set one form field (`-` reads the value from stdin)
    Set {
        /// Field name (title, servings, provider, reference, page, category,
        /// meal, cuisine, description, image, ingredients, instructions)
        field: FormField,

        /// New value; words are joined with spaces, nothing clears the field
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },

    /// Edit one form field in $EDITOR
    Edit {
        /// Field name
        field: FormField,
    },

    /// Save the form as a new recipe or over the open one
    Save,

    /// Delete a recipe (the open one by default)
    #[command(alias = "rm")]
    Delete {
        /// List position, id or title
        recipe: Option<String>,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Give the form a new id, moving a saved recipe
    RegenerateId {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Fill the form from recipe text (JSON or relaxed JSON)
    Paste {
        /// File to read (defaults to stdin)
        file: Option<PathBuf>,

        /// Read from the clipboard
        #[arg(short, long, conflicts_with = "file")]
        clipboard: bool,
    },

    /// Step back to the previous saved state of the form
    Undo,

    /// Step forward again after undo
    Redo,

    /// Print the form as a card
    Preview,

    /// Import recipes from JSON files
    Import {
        /// Files containing a recipe or an array of recipes
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Export all recipes as JSON (to stdout by default)
    Export {
        /// Copy to the clipboard instead
        #[arg(short, long, conflicts_with = "dir")]
        clipboard: bool,

        /// Write recipes_<date>.json into this directory
        #[arg(short, long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// Show or select the list sort order
    Sort {
        /// alphabetical, person, source or date
        key: Option<SortKey>,
    },

    /// Print the suggested categories, meals and cuisines
    Suggest,

    /// Print a prompt asking an AI tool for recipe JSON
    Template {
        /// Copy to the clipboard as well
        #[arg(short, long)]
        copy: bool,
    },

    /// Print an image-generation prompt for the form
    ImagePrompt {
        /// Copy to the clipboard as well
        #[arg(short, long)]
        copy: bool,
    },
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::List { .. } => "list",
            Commands::Show { .. } => "show",
            Commands::New => "new",
            Commands::Open { .. } => "open",
            Commands::Form => "form",
            Commands::Set { .. } => "set",
            Commands::Edit { .. } => "edit",
            Commands::Save => "save",
            Commands::Delete { .. } => "delete",
            Commands::RegenerateId { .. } => "regenerate-id",
            Commands::Paste { .. } => "paste",
            Commands::Undo => "undo",
            Commands::Redo => "redo",
            Commands::Preview => "preview",
            Commands::Import { .. } => "import",
            Commands::Export { .. } => "export",
            Commands::Sort { .. } => "sort",
            Commands::Suggest => "suggest",
            Commands::Template { .. } => "template",
            Commands::ImagePrompt { .. } => "image-prompt",
        }
    }
}

/// Command group definitions for help output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Collection,
    Form,
    Data,
    Prompts,
}

impl CommandGroup {
    pub fn heading(&self) -> &'static str {
        match self {
            CommandGroup::Collection => "Collection:",
            CommandGroup::Form => "Form:",
            CommandGroup::Data => "Data:",
            CommandGroup::Prompts => "Prompts:",
        }
    }

    pub fn for_command(name: &str) -> Option<Self> {
        match name {
            "list" | "show" | "sort" | "suggest" => Some(CommandGroup::Collection),
            "new" | "open" | "form" | "set" | "edit" | "save" | "delete" | "regenerate-id"
            | "paste" | "undo" | "redo" | "preview" => Some(CommandGroup::Form),
            "import" | "export" => Some(CommandGroup::Data),
            "template" | "image-prompt" => Some(CommandGroup::Prompts),
            _ => None,
        }
    }

    pub fn all() -> &'static [CommandGroup] {
        &[
            CommandGroup::Collection,
            CommandGroup::Form,
            CommandGroup::Data,
            CommandGroup::Prompts,
        ]
    }
}

pub fn get_grouped_help() -> String {
    let cmd = Cli::command();
    let version = cmd.get_version().unwrap_or("unknown");

    let mut output = String::new();
    output.push_str(&format!("cardbox {version}\n"));
    output.push_str("Recipe cards from the terminal\n");
    output.push('\n');
    output.push_str("Usage: cardbox [OPTIONS] [COMMAND]\n");

    let subcommands: Vec<_> = cmd.get_subcommands().collect();
    for group in CommandGroup::all() {
        let group_cmds: Vec<_> = subcommands
            .iter()
            .filter(|sc| CommandGroup::for_command(sc.get_name()) == Some(*group))
            .collect();
        if group_cmds.is_empty() {
            continue;
        }
        output.push('\n');
        output.push_str(&format!("{}\n", group.heading()));
        for sc in group_cmds {
            let about = sc.get_about().map(|s| s.to_string()).unwrap_or_default();
            output.push_str(&format!("  {:<14} {}\n", sc.get_name(), about));
        }
    }

    output.push('\n');
    output.push_str("Options:\n");
    output.push_str("      --data <DIR>  Data directory\n");
    output.push_str("  -v, --verbose     Verbose output\n");
    output.push_str("  -h, --help        Print help\n");
    output.push_str("  -V, --version     Print version\n");
    output
}

/// Prints help for the given subcommand, or the grouped overview.
pub fn print_help(command: &Option<Commands>) {
    let Some(command) = command else {
        print!("{}", get_grouped_help());
        return;
    };

    let mut cmd = Cli::command();
    for subcmd in cmd.get_subcommands_mut() {
        if subcmd.get_name() == command.name() {
            print!("{}", subcmd.render_help());
            return;
        }
    }
    print!("{}", get_grouped_help());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn every_subcommand_has_a_group() {
        for sc in Cli::command().get_subcommands() {
            assert!(
                CommandGroup::for_command(sc.get_name()).is_some(),
                "{} has no help group",
                sc.get_name()
            );
        }
    }

    #[test]
    fn set_joins_words_and_accepts_field_aliases() {
        let cli = Cli::parse_from(["cardbox", "set", "page", "1", "2"]);
        match cli.command {
            Some(Commands::Set { field, value }) => {
                assert_eq!(field, FormField::PageNumber);
                assert_eq!(value, vec!["1", "2"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn set_value_may_start_with_dash() {
        let cli = Cli::parse_from(["cardbox", "set", "description", "-", "rich"]);
        match cli.command {
            Some(Commands::Set { value, .. }) => assert_eq!(value, vec!["-", "rich"]),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn list_sort_parses_key() {
        let cli = Cli::parse_from(["cardbox", "ls", "--sort", "date"]);
        assert!(matches!(
            cli.command,
            Some(Commands::List {
                sort: Some(SortKey::Date)
            })
        ));
    }

    #[test]
    fn names_match_clap() {
        let cli = Cli::parse_from(["cardbox", "regenerate-id", "--yes"]);
        assert_eq!(cli.command.unwrap().name(), "regenerate-id");
        let cli = Cli::parse_from(["cardbox", "image-prompt"]);
        assert_eq!(cli.command.unwrap().name(), "image-prompt");
    }

    #[test]
    fn grouped_help_lists_commands() {
        let help = get_grouped_help();
        assert!(help.contains("Form:"));
        assert!(help.contains("  paste"));
        assert!(help.contains("--data <DIR>"));
    }
}
