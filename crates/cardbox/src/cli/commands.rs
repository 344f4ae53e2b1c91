//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr, stdin)
//! - Asks for confirmation
//! - Hands text to the clipboard or the editor
//! - Formats output for human consumption
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `handle_*()`: Per-command handlers that call the API and print results
//! - `confirm()`, `read_stdin()`: interactive helpers

use super::render::{print_messages, render_form, render_list, render_suggestions};
use super::setup::{print_help, Cli, Commands};
use cardboxapp::api::CardboxApi;
use cardboxapp::clipboard::{copy_to_clipboard, read_clipboard};
use cardboxapp::commands::{CmdMessage, CmdResult};
use cardboxapp::editor::edit_field;
use cardboxapp::error::{CardboxError, Result};
use cardboxapp::form::FormField;
use cardboxapp::init::initialize;
use cardboxapp::model::SortKey;
use cardboxapp::store::fs::FileStore;
use clap::Parser;
use log::LevelFilter;
use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};

type Api = CardboxApi<FileStore>;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.help {
        print_help(&cli.command);
        return Ok(());
    }

    let mut ctx = initialize(cli.data.clone())?;
    let api = &mut ctx.api;

    match cli.command {
        None => handle_list(api, None),
        Some(Commands::List { sort }) => handle_list(api, sort),
        Some(Commands::Show { recipe }) => handle_show(api, &recipe),
        Some(Commands::New) => handle_new(api),
        Some(Commands::Open { recipe }) => handle_open(api, &recipe),
        Some(Commands::Form) => handle_form(api),
        Some(Commands::Set { field, value }) => handle_set(api, field, value),
        Some(Commands::Edit { field }) => handle_edit(api, field),
        Some(Commands::Save) => handle_save(api),
        Some(Commands::Delete { recipe, yes }) => handle_delete(api, recipe.as_deref(), yes),
        Some(Commands::RegenerateId { yes }) => handle_regenerate(api, yes),
        Some(Commands::Paste { file, clipboard }) => handle_paste(api, file.as_deref(), clipboard),
        Some(Commands::Undo) => handle_undo(api),
        Some(Commands::Redo) => handle_redo(api),
        Some(Commands::Preview) => handle_preview(api),
        Some(Commands::Import { paths }) => handle_import(api, &paths),
        Some(Commands::Export { clipboard, dir }) => handle_export(api, clipboard, dir),
        Some(Commands::Sort { key }) => handle_sort(api, key),
        Some(Commands::Suggest) => handle_suggest(api),
        Some(Commands::Template { copy }) => handle_template(api, copy),
        Some(Commands::ImagePrompt { copy }) => handle_image_prompt(api, copy),
    }
}

/// Warnings by default, debug with `--verbose`; `RUST_LOG` overrides both.
fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

fn confirm(question: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    eprint!("{} [y/N] ", question);
    io::stderr().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes"
    ))
}

fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

fn print_output(result: &CmdResult) {
    if let Some(output) = &result.output {
        println!("{}", output);
    }
}

fn copy_output(result: &CmdResult) {
    let Some(output) = &result.output else {
        return;
    };
    match copy_to_clipboard(output) {
        Ok(()) => print_messages(&[CmdMessage::success("Copied to clipboard")]),
        Err(e) => eprintln!("Warning: Failed to copy to clipboard: {}", e),
    }
}

fn handle_list(api: &Api, sort: Option<SortKey>) -> Result<()> {
    let result = api.list(sort);
    println!("{}", render_list(&result.listed_recipes));
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(api: &Api, selector: &str) -> Result<()> {
    let result = api.show(selector)?;
    print_output(&result);
    print_messages(&result.messages);
    Ok(())
}

fn handle_new(api: &mut Api) -> Result<()> {
    let result = api.clear_form()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_open(api: &mut Api, selector: &str) -> Result<()> {
    let result = api.open_recipe(selector)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_form(api: &Api) -> Result<()> {
    let result = api.show_form();
    if let Some(form) = &result.form {
        println!("{}", render_form(form, result.history.as_ref()));
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_set(api: &mut Api, field: FormField, value: Vec<String>) -> Result<()> {
    let text = if value.len() == 1 && value[0] == "-" {
        let raw = read_stdin()?;
        raw.strip_suffix('\n').unwrap_or(&raw).to_string()
    } else {
        value.join(" ")
    };
    let result = api.set_field(field, text)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(api: &mut Api, field: FormField) -> Result<()> {
    let current = api.form().field(field).to_string();
    let edited = edit_field(field, &current)?;
    if edited == current {
        print_messages(&[CmdMessage::info(format!("{} unchanged", field))]);
        return Ok(());
    }
    let result = api.set_field(field, edited)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_save(api: &mut Api) -> Result<()> {
    let result = api.save()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(api: &mut Api, selector: Option<&str>, yes: bool) -> Result<()> {
    let target = match selector {
        Some(selector) => Some(api.resolve(selector)?),
        None => api.open_saved_id().map(str::to_string),
    };

    if let Some(recipe) = target.as_deref().and_then(|id| api.repository().get(id)) {
        let question = format!("Delete \"{}\"?", recipe.title);
        if !confirm(&question, yes)? {
            print_messages(&[CmdMessage::info("Cancelled")]);
            return Ok(());
        }
    }

    let result = api.delete(target.as_deref())?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_regenerate(api: &mut Api, yes: bool) -> Result<()> {
    if let Some(recipe) = api.open_saved_id().and_then(|id| api.repository().get(id)) {
        let question = format!(
            "Move \"{}\" to a new id? Links to {} will stop working.",
            recipe.title, recipe.id
        );
        if !confirm(&question, yes)? {
            print_messages(&[CmdMessage::info("Cancelled")]);
            return Ok(());
        }
    }

    let result = api.regenerate_id()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_paste(api: &mut Api, file: Option<&Path>, clipboard: bool) -> Result<()> {
    let text = if clipboard {
        read_clipboard()?
    } else if let Some(path) = file {
        std::fs::read_to_string(path)
            .map_err(|e| CardboxError::Api(format!("{}: {}", path.display(), e)))?
    } else if io::stdin().is_terminal() {
        return Err(CardboxError::Api(
            "Nothing to paste: give a file, pipe text in or use --clipboard".to_string(),
        ));
    } else {
        read_stdin()?
    };

    let result = api.paste(&text)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_undo(api: &mut Api) -> Result<()> {
    let result = api.undo()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_redo(api: &mut Api) -> Result<()> {
    let result = api.redo()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_preview(api: &Api) -> Result<()> {
    let result = api.preview()?;
    print_output(&result);
    Ok(())
}

fn handle_import(api: &mut Api, paths: &[PathBuf]) -> Result<()> {
    let result = api.import(paths)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_export(api: &Api, clipboard: bool, dir: Option<PathBuf>) -> Result<()> {
    if let Some(dir) = dir {
        let result = api.export_to(&dir)?;
        print_messages(&result.messages);
        return Ok(());
    }

    let result = api.export_payload()?;
    if clipboard {
        copy_output(&result);
    } else {
        print_output(&result);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_sort(api: &mut Api, key: Option<SortKey>) -> Result<()> {
    let result = match key {
        Some(key) => api.set_sort(key)?,
        None => api.show_sort(),
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_suggest(api: &Api) -> Result<()> {
    let result = api.suggestions();
    if let Some(suggestions) = &result.suggestions {
        println!("{}", render_suggestions(suggestions));
    }
    Ok(())
}

fn handle_template(api: &Api, copy: bool) -> Result<()> {
    let result = api.template()?;
    print_output(&result);
    if copy {
        copy_output(&result);
    }
    Ok(())
}

fn handle_image_prompt(api: &Api, copy: bool) -> Result<()> {
    let result = api.image_prompt()?;
    print_output(&result);
    if copy {
        copy_output(&result);
    }
    Ok(())
}
