pub mod buffer;
pub mod element;
pub mod event;
pub mod fieldset;
pub mod hit;
pub mod layout;
pub mod render;
pub mod scroll;
pub mod terminal;
pub mod text;
pub mod transitions;
pub mod types;

pub use buffer::Buffer;
pub use element::{
    child_with_class, collect_by_class, descendant_with_class, find_element, find_element_mut,
    remove_child_by_id, Content, Element,
};
pub use event::{Event, EventTranslator, Key, Modifiers, MouseButton};
pub use fieldset::{
    ChildTarget, FieldsetSettings, FieldsetState, IconSetting, Section, SectionParts,
    SectionState, ToggleOptions, Trigger,
};
pub use hit::{hit_test, hit_test_any};
pub use layout::{intrinsic_height, layout, LayoutResult, Rect};
pub use scroll::ScrollState;
pub use terminal::Terminal;
pub use transitions::{Easing, SlideSettings};
pub use types::*;
