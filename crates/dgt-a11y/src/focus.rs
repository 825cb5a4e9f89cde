//! Focus order

/// Sequential focus position, written as `tabindex`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabIndex(pub i32);

impl TabIndex {
    /// Natural document order (`tabindex="0"`)
    pub const DOCUMENT_ORDER: TabIndex = TabIndex(0);

    /// Attribute value
    pub fn to_attribute(&self) -> String {
        self.0.to_string()
    }
}
