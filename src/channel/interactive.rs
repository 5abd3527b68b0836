use crate::feed::{Category, Channel, Image, Owner, SubCategory};
use crate::util::first_non_empty;

use super::prompt::{PromptError, Prompter};

/// Copyright used when the answer is left empty.
pub const DEFAULT_COPYRIGHT: &str = "个人 @iWant.link";

/// Language used when the answer is left empty.
pub const DEFAULT_LANGUAGE: &str = "zh-ch";

/// Asks for every channel field in a fixed order and builds the channel.
///
/// Empty answers fall back as follows; all other fields stay empty:
///
/// | field     | fallback              |
/// |-----------|-----------------------|
/// | copyright | [`DEFAULT_COPYRIGHT`] |
/// | subtitle  | the title just given  |
/// | language  | [`DEFAULT_LANGUAGE`]  |
///
/// The owner name mirrors the author and the summary mirrors the description.
pub fn from_prompts<P: Prompter + ?Sized>(prompter: &mut P) -> Result<Channel, PromptError> {
    prompter.notice("fill course info")?;

    let copyright = prompter.prompt(&format!("copyright(default {DEFAULT_COPYRIGHT})"))?;
    let title = prompter.prompt("title")?;
    let subtitle = prompter.prompt("subtitle(default title)")?;
    let language = prompter.prompt(&format!("language(default {DEFAULT_LANGUAGE})"))?;
    let link = prompter.prompt("link")?;
    let author = prompter.prompt("author")?;
    let description = prompter.prompt("desc")?;
    let image = prompter.prompt("image")?;
    let category = prompter.prompt("category")?;
    let subcategory = prompter.prompt("sub category")?;

    Ok(Channel {
        copyright: first_non_empty(&[copyright.as_str(), DEFAULT_COPYRIGHT]).to_string(),
        language: first_non_empty(&[language.as_str(), DEFAULT_LANGUAGE]).to_string(),
        link,
        subtitle: first_non_empty(&[subtitle.as_str(), title.as_str()]).to_string(),
        title,
        owner: Owner {
            name: author.clone(),
        },
        author,
        summary: description.clone(),
        description,
        image: Image::new(image),
        category: Category {
            text: category,
            subcategory: SubCategory { text: subcategory },
        },
        items: Vec::new(),
    })
}
