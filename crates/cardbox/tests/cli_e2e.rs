#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cardbox(data: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("cardbox"));
    cmd.env("CARDBOX_DATA", data.path().as_os_str())
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn save_recipe(data: &TempDir, title: &str, servings: &str) {
    cardbox(data).args(["new"]).assert().success();
    cardbox(data).args(["set", "title", title]).assert().success();
    cardbox(data)
        .args(["set", "servings", servings])
        .assert()
        .success();
    cardbox(data).args(["save"]).assert().success();
}

#[test]
fn naked_run_lists_empty_collection() {
    let data = TempDir::new().unwrap();
    cardbox(&data)
        .assert()
        .success()
        .stdout(predicate::str::contains("No recipes yet."));
}

#[test]
fn edit_save_update_and_undo() {
    let data = TempDir::new().unwrap();

    cardbox(&data).args(["new"]).assert().success();
    cardbox(&data)
        .args(["set", "title", "Cinnamon", "buns"])
        .assert()
        .success();
    cardbox(&data)
        .args(["set", "servings", "12"])
        .assert()
        .success();
    cardbox(&data)
        .args(["save"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recipe \"Cinnamon buns\" saved"));

    cardbox(&data)
        .args(["set", "servings", "24"])
        .assert()
        .success();
    cardbox(&data)
        .args(["save"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recipe \"Cinnamon buns\" updated"));

    cardbox(&data)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Cinnamon buns"))
        .stdout(predicate::str::contains("2.").not());

    cardbox(&data)
        .args(["undo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Undone"));
    cardbox(&data)
        .args(["form"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"servings:\s+12\n").unwrap());

    cardbox(&data)
        .args(["redo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Redone"));
    cardbox(&data)
        .args(["redo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to redo"));
}

#[test]
fn save_requires_title() {
    let data = TempDir::new().unwrap();
    cardbox(&data).args(["new"]).assert().success();
    cardbox(&data)
        .args(["save"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Title is required"));
}

#[test]
fn paste_relaxed_text_from_stdin() {
    let data = TempDir::new().unwrap();
    cardbox(&data)
        .args(["paste"])
        .write_stdin(
            "{title: 'Pancakes', servings: '4', ingredients: ['flour', 'milk', 'eggs',], \
             instructions: ['Whisk', 'Fry'],}",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("Parsed."));

    cardbox(&data).args(["save"]).assert().success();

    cardbox(&data)
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pancakes\n========"))
        .stdout(predicate::str::contains("  • milk"))
        .stdout(predicate::str::contains("  2. Fry"));
}

#[test]
fn paste_garbage_fails_and_keeps_form() {
    let data = TempDir::new().unwrap();
    save_recipe(&data, "Soup", "2");
    cardbox(&data)
        .args(["paste"])
        .write_stdin("this is not a recipe")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
    cardbox(&data)
        .args(["form"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Soup"));
}

#[test]
fn import_then_export() {
    let data = TempDir::new().unwrap();
    let input = data.path().join("in.json");
    fs::write(
        &input,
        r#"[
            {"id": "x", "title": "Bread", "servings": "1 loaf", "provider": "Mom"},
            {"title": "Apple pie", "servings": "8"},
            {"servings": "2"}
        ]"#,
    )
    .unwrap();

    cardbox(&data)
        .arg("import")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 recipes"))
        .stdout(predicate::str::contains("Skipped 1 entry without a title"));

    cardbox(&data)
        .args(["export"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[\n{"))
        .stdout(predicate::str::contains("\"title\":\"Apple pie\""))
        .stdout(predicate::str::contains("\"title\":\"Bread\""));

    let out = TempDir::new().unwrap();
    cardbox(&data)
        .arg("export")
        .arg("--dir")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 recipes"));
    let written: Vec<_> = fs::read_dir(out.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(written.len(), 1);
    assert!(written[0].starts_with("recipes_") && written[0].ends_with(".json"));
}

#[test]
fn export_of_empty_collection_warns() {
    let data = TempDir::new().unwrap();
    cardbox(&data)
        .args(["export"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No recipes to export"));
}

#[test]
fn delete_asks_for_confirmation() {
    let data = TempDir::new().unwrap();
    save_recipe(&data, "Stew", "4");

    cardbox(&data)
        .args(["delete", "Stew"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled"));
    cardbox(&data)
        .args(["list"])
        .assert()
        .stdout(predicate::str::contains("Stew"));

    cardbox(&data)
        .args(["delete", "1"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Recipe \"Stew\" deleted"));
    cardbox(&data)
        .args(["list"])
        .assert()
        .stdout(predicate::str::contains("No recipes yet."));
}

#[test]
fn delete_unknown_recipe_fails() {
    let data = TempDir::new().unwrap();
    cardbox(&data)
        .args(["delete", "7", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Recipe not found"));
}

#[test]
fn regenerate_moves_saved_recipe() {
    let data = TempDir::new().unwrap();
    save_recipe(&data, "Cake", "10");
    let before = fs::read_to_string(data.path().join("recipes.json")).unwrap();

    cardbox(&data)
        .args(["regenerate-id", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recipe moved to recipe_"));

    let after = fs::read_to_string(data.path().join("recipes.json")).unwrap();
    assert_ne!(before, after);
    cardbox(&data)
        .args(["list"])
        .assert()
        .stdout(predicate::str::contains("1. Cake"))
        .stdout(predicate::str::contains("2.").not());
}

#[test]
fn sort_selection_persists() {
    let data = TempDir::new().unwrap();
    cardbox(&data)
        .args(["sort", "date"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sorting by date"));
    cardbox(&data)
        .args(["sort"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[date]"));
    assert_eq!(
        fs::read_to_string(data.path().join("sort-order"))
            .unwrap()
            .trim(),
        "date"
    );
}

#[test]
fn invalid_sort_key_is_rejected() {
    let data = TempDir::new().unwrap();
    cardbox(&data).args(["sort", "color"]).assert().failure();
}

#[test]
fn prompts() {
    let data = TempDir::new().unwrap();
    cardbox(&data)
        .args(["template"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"pageNumber\""));

    cardbox(&data)
        .args(["image-prompt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Enter a title"));

    save_recipe(&data, "Waffles", "4");
    cardbox(&data)
        .args(["image-prompt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recipe title: Waffles"));
}

#[test]
fn config_file_adds_suggestions() {
    let data = TempDir::new().unwrap();
    fs::write(
        data.path().join("cardbox.toml"),
        "cuisines = [\"Thai\", \"Greek\"]\n",
    )
    .unwrap();
    cardbox(&data)
        .args(["suggest"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cuisines: Thai, Greek"));
}

#[test]
fn data_flag_overrides_environment() {
    let env_dir = TempDir::new().unwrap();
    let flag_dir = TempDir::new().unwrap();
    save_recipe(&env_dir, "Only here", "1");

    cardbox(&env_dir)
        .arg("--data")
        .arg(flag_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No recipes yet."));
}

#[test]
fn grouped_help() {
    let data = TempDir::new().unwrap();
    cardbox(&data)
        .args(["--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Form:"))
        .stdout(predicate::str::contains("regenerate-id"));
}
