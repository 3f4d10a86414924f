#[derive(Debug, Clone, Default)]
pub enum Content {
    #[default]
    None,
    Text(String),
    Children(Vec<super::Element>),
    /// A referenced image. Terminals can't decode it, so it renders as a
    /// framed placeholder carrying the source path.
    Image {
        source: String,
    },
}
