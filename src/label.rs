use std::borrow::Cow;
use std::fmt;

/// Display text of a tree node.
///
/// Every `Display` type gets this for free, so `&str`, `String` and numbers can
/// be used as labels directly. The text may span several lines.
pub trait ItemText {
    fn item_text(&self) -> Cow<'_, str>;
}

impl<T: fmt::Display + ?Sized> ItemText for T {
    fn item_text(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }
}
