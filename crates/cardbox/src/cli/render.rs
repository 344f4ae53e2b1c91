use cardboxapp::commands::{CmdMessage, HistoryStatus, MessageLevel};
use cardboxapp::form::{FormField, FormState};
use cardboxapp::view::{RecipeView, Suggestions};
use colored::*;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const META_WIDTH: usize = 36;
const ACTIVE_MARKER: &str = "▸";

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => eprintln!("{}", message.content.red()),
        }
    }
}

pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

/// One line per recipe: position, title and the annotation for the sort order.
pub fn render_list(recipes: &[RecipeView]) -> String {
    if recipes.is_empty() {
        return "No recipes yet.".to_string();
    }

    let idx_width = recipes.len().to_string().len() + 2;
    let mut lines = Vec::with_capacity(recipes.len());
    for (i, view) in recipes.iter().enumerate() {
        let marker = if view.active { ACTIVE_MARKER } else { " " };
        let idx = format!("{:>width$}", format!("{}.", i + 1), width = idx_width);

        let meta = truncate_to_width(&view.meta.join(" · "), META_WIDTH);
        let fixed = 2 + idx_width + 1 + 2;
        let available = LINE_WIDTH.saturating_sub(fixed + META_WIDTH);
        let title = truncate_to_width(view.recipe.title.trim(), available);
        let padding = available.saturating_sub(title.width()) + 2;

        let title = if view.active {
            title.bold().to_string()
        } else {
            title
        };
        lines.push(format!(
            "{} {} {}{}{}",
            marker,
            idx.yellow(),
            title,
            " ".repeat(padding),
            meta.dimmed()
        ));
    }
    lines.join("\n")
}

pub fn render_history(status: &HistoryStatus) -> String {
    let mut moves = Vec::new();
    if status.can_undo {
        moves.push("undo");
    }
    if status.can_redo {
        moves.push("redo");
    }
    let moves = if moves.is_empty() {
        String::new()
    } else {
        format!(" ({} available)", moves.join(", "))
    };
    format!("History: {}/{}{}", status.position, status.len, moves)
}

/// The form as `field: value` lines; multi-line fields are indented below
/// their label.
pub fn render_form(form: &FormState, history: Option<&HistoryStatus>) -> String {
    let mut lines = Vec::new();
    match form.active_id() {
        Some(id) => lines.push(format!("Editing {}", id).bold().to_string()),
        None => lines.push("New recipe".bold().to_string()),
    }

    let label_width = FormField::ALL
        .iter()
        .map(|f| f.name().len())
        .max()
        .unwrap_or(0)
        + 1;
    for field in FormField::ALL {
        let value = form.field(field);
        let label = format!("{}:", field.name());
        if field.is_multiline() && value.contains('\n') {
            lines.push(label.cyan().to_string());
            lines.extend(value.lines().map(|line| format!("    {}", line)));
        } else {
            let label = format!("{:<width$}", label, width = label_width);
            lines.push(format!("{} {}", label.cyan(), value));
        }
    }

    if let Some(status) = history {
        lines.push(String::new());
        lines.push(render_history(status).dimmed().to_string());
    }
    lines.join("\n")
}

pub fn render_suggestions(suggestions: &Suggestions) -> String {
    [
        ("Categories", &suggestions.categories),
        ("Meals", &suggestions.meals),
        ("Cuisines", &suggestions.cuisines),
    ]
    .iter()
    .map(|(label, values)| format!("{}: {}", label.bold(), values.join(", ")))
    .collect::<Vec<_>>()
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardboxapp::model::Recipe;

    fn plain() {
        colored::control::set_override(false);
    }

    fn view(title: &str, meta: &[&str], active: bool) -> RecipeView {
        RecipeView {
            recipe: Recipe::new(title, "4"),
            meta: meta.iter().map(|m| m.to_string()).collect(),
            active,
        }
    }

    #[test]
    fn truncates_wide_text() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdefghij", 5), "abcd…");
        assert_eq!(truncate_to_width("ææææææ", 4), "æææ…");
        assert_eq!(truncate_to_width("日本語のレシピ", 5), "日本…");
    }

    #[test]
    fn list_marks_active_recipe() {
        plain();
        let out = render_list(&[
            view("Apple pie", &["Cake", "Dessert"], false),
            view("Bread", &[], true),
        ]);
        let lines: Vec<_> = out.lines().collect();
        assert!(lines[0].starts_with("   1. Apple pie"));
        assert!(lines[0].ends_with("Cake · Dessert"));
        assert!(lines[1].starts_with("▸  2. Bread"));
    }

    #[test]
    fn empty_list_says_so() {
        assert_eq!(render_list(&[]), "No recipes yet.");
    }

    #[test]
    fn history_line_names_available_moves() {
        let status = HistoryStatus {
            position: 2,
            len: 3,
            can_undo: true,
            can_redo: true,
        };
        assert_eq!(
            render_history(&status),
            "History: 2/3 (undo, redo available)"
        );
        let status = HistoryStatus {
            position: 1,
            len: 1,
            can_undo: false,
            can_redo: false,
        };
        assert_eq!(render_history(&status), "History: 1/1");
    }

    #[test]
    fn form_indents_multiline_fields() {
        plain();
        let form = FormState {
            title: "Waffles".into(),
            ingredients: "flour\nmilk".into(),
            ..Default::default()
        };
        let out = render_form(&form, None);
        assert!(out.starts_with("New recipe\n"));
        assert!(out.contains("\ntitle:        Waffles\n"));
        assert!(out.contains("ingredients:\n    flour\n    milk"));
    }

    #[test]
    fn suggestions_are_listed_per_kind() {
        plain();
        let out = render_suggestions(&Suggestions {
            categories: vec!["Bread".into(), "Cake".into()],
            meals: vec![],
            cuisines: vec!["French".into()],
        });
        assert_eq!(out, "Categories: Bread, Cake\nMeals: \nCuisines: French");
    }
}
