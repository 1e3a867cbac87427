// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types: the event vocabulary, pointer identity, input snapshots and tree lookups.

use std::borrow::Cow;
use std::fmt;

use kurbo::Point;

/// Named event types.
///
/// This is the vocabulary shared by dispatchers and listeners. [`EventType::Custom`] carries
/// application-defined names.
///
/// The stage fires pointer, drag, membership, popup and position/size events itself. Control
/// events (`Changed`, `Submit`, `ClickItem` and the like) are fired by the components that
/// own them through the stage's dispatch calls.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventType {
    /// Press and release over a common target without moving past the cancel distance.
    Click,
    /// Pointer pressed.
    TouchBegin,
    /// Pointer moved while pressed (delivered to captors).
    TouchMove,
    /// Pointer released.
    TouchEnd,
    /// Pointer entered a node.
    RollOver,
    /// Pointer left a node.
    RollOut,
    /// Wheel scrolled.
    MouseWheel,
    /// Drag is about to start; prevent-default cancels it.
    DragStart,
    /// Dragged node moved.
    DragMove,
    /// Drag finished.
    DragEnd,
    /// Drag-and-drop payload released over a node.
    Drop,
    /// Node became reachable from the stage root.
    AddedToStage,
    /// Node stopped being reachable from the stage root.
    RemovedFromStage,
    /// A control's value changed.
    Changed,
    /// A scroll position changed. Fired by scrolling components, not by the stage.
    Scroll,
    /// A scroll animation settled. Fired by scrolling components, not by the stage.
    ScrollEnd,
    /// A text input was submitted.
    Submit,
    /// A pull-down gesture was released past its threshold.
    PullDownRelease,
    /// A pull-up gesture was released past its threshold.
    PullUpRelease,
    /// A link in rich text was clicked.
    ClickLink,
    /// An item of a list was clicked.
    ClickItem,
    /// A gear animation stopped.
    GearStopped,
    /// A node's position changed.
    PositionChanged,
    /// A node's size changed.
    SizeChanged,
    /// A key was pressed. Fired by the host, which owns keyboard focus.
    KeyDown,
    /// A popup was closed.
    PopupClosed,
    /// Application-defined event.
    Custom(Cow<'static, str>),
}

impl EventType {
    /// Application-defined event type.
    pub fn custom(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Custom(name.into())
    }

    /// Stable name of the event type.
    pub fn name(&self) -> &str {
        match self {
            Self::Click => "onClick",
            Self::TouchBegin => "onTouchBegin",
            Self::TouchMove => "onTouchMove",
            Self::TouchEnd => "onTouchEnd",
            Self::RollOver => "onRollOver",
            Self::RollOut => "onRollOut",
            Self::MouseWheel => "onMouseWheel",
            Self::DragStart => "onDragStart",
            Self::DragMove => "onDragMove",
            Self::DragEnd => "onDragEnd",
            Self::Drop => "onDrop",
            Self::AddedToStage => "onAddedToStage",
            Self::RemovedFromStage => "onRemovedFromStage",
            Self::Changed => "onChanged",
            Self::Scroll => "onScroll",
            Self::ScrollEnd => "onScrollEnd",
            Self::Submit => "onSubmit",
            Self::PullDownRelease => "onPullDownRelease",
            Self::PullUpRelease => "onPullUpRelease",
            Self::ClickLink => "onClickLink",
            Self::ClickItem => "onClickItem",
            Self::GearStopped => "onGearStopped",
            Self::PositionChanged => "onPositionChanged",
            Self::SizeChanged => "onSizeChanged",
            Self::KeyDown => "onKeyDown",
            Self::PopupClosed => "onPopupClosed",
            Self::Custom(name) => name,
        }
    }

    /// Whether this is a pointer-driven event.
    pub fn is_pointer(&self) -> bool {
        matches!(
            self,
            Self::Click
                | Self::TouchBegin
                | Self::TouchMove
                | Self::TouchEnd
                | Self::RollOver
                | Self::RollOut
                | Self::MouseWheel
        )
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identity of one pointer stream: host user index plus pointer index.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TouchId {
    /// Host user (player/seat) index.
    pub user: u32,
    /// Pointer index within the user (0 for the primary mouse button stream).
    pub pointer: u32,
}

impl TouchId {
    /// The primary pointer of the first user.
    pub const PRIMARY: Self = Self {
        user: 0,
        pointer: 0,
    };

    /// Touch id for `user` and `pointer`.
    pub const fn new(user: u32, pointer: u32) -> Self {
        Self { user, pointer }
    }
}

/// Pointer button.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button or finger.
    #[default]
    Left,
    /// Secondary button.
    Right,
    /// Middle button.
    Middle,
    /// Any other button, by host code.
    Other(u16),
}

/// Pointer state attached to an event.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    /// Global pointer position.
    pub position: Point,
    /// Pointer identity.
    pub touch: TouchId,
    /// Button involved.
    pub button: MouseButton,
    /// Wheel delta (positive scrolls down).
    pub wheel_delta: f64,
    /// 1 for single, 2 for double clicks; 0 when unknown.
    pub click_count: u32,
}

impl InputSnapshot {
    /// Snapshot at `position` for `touch`.
    pub fn at(touch: TouchId, position: Point) -> Self {
        Self {
            position,
            touch,
            ..Self::default()
        }
    }
}

/// Look up the parent of a node.
pub trait ParentLookup<K> {
    /// Returns the parent of `node`, or `None` if `node` is a root.
    fn parent_of(&self, node: &K) -> Option<K>;
}

/// Look up the ordered children of a node.
pub trait ChildLookup<K> {
    /// Children of `node` in order.
    fn children_of(&self, node: &K) -> Vec<K>;
}
