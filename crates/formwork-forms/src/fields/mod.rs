//! Concrete field kinds.
//!
//! Each kind is a closed configuration struct embedding a
//! [`FieldCore`](crate::field::FieldCore) and implementing
//! [`Field`](crate::field::Field) plus the capability traits its validators
//! query.
//!
//! | Kind | HTML type | Default validators |
//! |---|---|---|
//! | [`Text`] | text, email, password, search, tel, url | `SafeString` (`Email` for email) |
//! | [`Textarea`] | textarea | `SafeString`, plus `MaxLength` when `maxlength` is set |
//! | [`Number`] | number, range | `Number` |
//! | [`Date`] | date, datetime-local, time, month, week | `Date` |
//! | [`Hidden`] | hidden | `SafeString` |
//! | [`Checkbox`] | checkbox | `Checkbox` |
//! | [`FieldsGroup`] | radio, checkbox | `ValueInOptions` |
//! | [`SubmitButton`] | submit | none |
//! | [`ResetInput`] | reset | none |

pub mod buttons;
pub mod checkbox;
pub mod date;
pub mod group;
pub mod hidden;
pub mod number;
pub mod text;
pub mod textarea;

pub use buttons::{ResetInput, SubmitButton};
pub use checkbox::Checkbox;
pub use date::{Date, DateKind};
pub use group::{FieldOption, FieldsGroup};
pub use hidden::Hidden;
pub use number::{Number, NumberKind};
pub use text::{Text, TextType};
pub use textarea::Textarea;

use std::collections::BTreeMap;

use formwork_core::Translator;

/// Collects optional kind-specific attributes into an attribute map.
pub(crate) fn kind_attrs(pairs: &[(&str, Option<String>)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .filter_map(|(name, value)| value.clone().map(|v| ((*name).to_string(), v)))
        .collect()
}

/// Translates `text` in place when a translator is given.
pub(crate) fn translate_in_place(text: &mut String, translator: Option<&dyn Translator>) {
    if let Some(translator) = translator {
        if !text.is_empty() {
            *text = translator.translate(text);
        }
    }
}
