use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::SortKey;
use crate::store::DataStore;

/// Persists the selected sort order.
pub fn set<S: DataStore>(store: &S, key: SortKey) -> Result<CmdResult> {
    store.save_sort_key(key)?;
    Ok(CmdResult::default().with_message(CmdMessage::success(format!("Sorting by {}", key))))
}

pub fn show(key: SortKey) -> CmdResult {
    let options = SortKey::ALL
        .iter()
        .map(|k| {
            if *k == key {
                format!("[{}]", k)
            } else {
                k.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    CmdResult::default().with_message(CmdMessage::info(format!("Sort order: {}", options)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn set_persists_key() {
        let store = InMemoryStore::new();
        set(&store, SortKey::Source).unwrap();
        assert_eq!(store.load_sort_key().unwrap(), Some(SortKey::Source));
    }

    #[test]
    fn show_marks_current_key() {
        let result = show(SortKey::Date);
        assert_eq!(
            result.messages[0].content,
            "Sort order: alphabetical person source [date]"
        );
    }
}
