use brewcast_core::{BrewcastError, Prompter, fuzzy};
use inquire::{InquireError, Select};

const PAGE_SIZE: usize = 10;

/// Terminal prompts backed by `inquire`, filtered with the core fuzzy matcher.
#[derive(Debug, Default)]
pub struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn choose(&self, message: &str, options: Vec<String>) -> Result<String, BrewcastError> {
        let scorer = |input: &str, _option: &String, value: &str, _idx: usize| fuzzy::score(input, value);

        Select::new(message, options)
            .with_scorer(&scorer)
            .with_page_size(PAGE_SIZE)
            .with_help_message("type to filter, ↑↓ to move, enter to select")
            .prompt()
            .map_err(|e| match e {
                InquireError::OperationCanceled | InquireError::OperationInterrupted => {
                    BrewcastError::input("selection cancelled")
                }
                other => BrewcastError::input(other.to_string()),
            })
    }
}
