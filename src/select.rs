//! Profile selection and write confirmation.

use crate::error::SyncError;
use crate::profile::Profile;

/// Which profiles a run targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    All,
    One(usize),
}

impl Selection {
    /// Resolve against the candidate list, rejecting out-of-range indexes.
    pub fn resolve<'a>(&self, candidates: &'a [Profile]) -> Result<Vec<&'a Profile>, SyncError> {
        match *self {
            Selection::All => Ok(candidates.iter().collect()),
            Selection::One(index) => candidates
                .get(index)
                .map(|p| vec![p])
                .ok_or_else(|| {
                    SyncError::Selection(format!(
                        "index {} out of range ({} profiles)",
                        index,
                        candidates.len()
                    ))
                }),
        }
    }
}

/// Chooses target profiles and confirms writes
pub trait ProfileSelector {
    fn select(&self, candidates: &[Profile]) -> Result<Selection, SyncError>;

    fn confirm(&self, prompt: &str) -> Result<bool, SyncError>;
}

/// Selects from command-line flags. Confirmation prompts only when
/// `confirm_on_terminal` is set and `assume_yes` is not.
#[derive(Debug, Clone, Default)]
pub struct PresetSelector {
    pub all: bool,
    pub profile: Option<String>,
    pub assume_yes: bool,
    pub confirm_on_terminal: bool,
}

impl ProfileSelector for PresetSelector {
    fn select(&self, candidates: &[Profile]) -> Result<Selection, SyncError> {
        if candidates.is_empty() {
            return Err(SyncError::Selection("no profiles found".to_string()));
        }
        if self.all {
            return Ok(Selection::All);
        }
        match &self.profile {
            Some(name) => candidates
                .iter()
                .position(|p| &p.name == name)
                .map(Selection::One)
                .ok_or_else(|| SyncError::Selection(format!("profile '{}' not found", name))),
            None => Err(SyncError::Selection(
                "use --all or --profile when not running interactively".to_string(),
            )),
        }
    }

    fn confirm(&self, prompt: &str) -> Result<bool, SyncError> {
        if self.assume_yes {
            return Ok(true);
        }
        if self.confirm_on_terminal {
            return prompt_confirm(prompt);
        }
        Ok(false)
    }
}

/// Interactive terminal prompts
#[derive(Debug, Clone, Default)]
pub struct PromptSelector {
    pub assume_yes: bool,
}

impl ProfileSelector for PromptSelector {
    fn select(&self, candidates: &[Profile]) -> Result<Selection, SyncError> {
        use dialoguer::Select;

        if candidates.is_empty() {
            return Err(SyncError::Selection("no profiles found".to_string()));
        }

        let mut items = vec!["All profiles".to_string()];
        items.extend(candidates.iter().map(|p| p.name.clone()));

        let choice = Select::new()
            .with_prompt("Profile to update")
            .items(&items)
            .default(0)
            .interact_opt()?;

        match choice {
            Some(0) => Ok(Selection::All),
            Some(i) => Ok(Selection::One(i - 1)),
            None => Err(SyncError::Selection("selection aborted".to_string())),
        }
    }

    fn confirm(&self, prompt: &str) -> Result<bool, SyncError> {
        if self.assume_yes {
            return Ok(true);
        }
        prompt_confirm(prompt)
    }
}

fn prompt_confirm(prompt: &str) -> Result<bool, SyncError> {
    use dialoguer::Confirm;

    Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
}
