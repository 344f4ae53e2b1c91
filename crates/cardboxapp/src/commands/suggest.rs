use crate::commands::CmdResult;
use crate::config::CardboxConfig;
use crate::repository::RecipeRepository;
use crate::store::DataStore;
use crate::view::suggestions;

pub fn run<S: DataStore>(repo: &RecipeRepository<S>, config: &CardboxConfig) -> CmdResult {
    CmdResult {
        suggestions: Some(suggestions(repo.list(), config)),
        ..Default::default()
    }
}
