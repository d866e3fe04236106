//! Skeleton placeholders
//!
//! A loading skeleton mirrors the shape of the content it stands in for. The
//! content is described as a typed [`RenderNode`] tree; [`SkeletonBuilder`]
//! walks it through the [`RenderVisitor`] trait and emits a parallel
//! [`SkeletonNode`] tree:
//!
//! | content            | placeholder      |
//! |--------------------|------------------|
//! | text / heading     | one bar per line |
//! | avatar             | circle           |
//! | image / button     | block            |
//! | stack              | group            |
//! | spacer             | nothing          |

use smallvec::SmallVec;

/// Layout direction of a stack
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StackDirection {
    #[default]
    Vertical,
    Horizontal,
}

/// Content tree a skeleton is derived from
#[derive(Clone, Debug, PartialEq)]
pub enum RenderNode {
    Text {
        content: String,
        font_size: f32,
    },
    Heading {
        content: String,
        level: u8,
    },
    Image {
        width: f32,
        height: f32,
    },
    Avatar {
        size: f32,
    },
    Button {
        label: String,
    },
    Stack {
        direction: StackDirection,
        gap: f32,
        children: Vec<RenderNode>,
    },
    Spacer,
}

impl RenderNode {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
            font_size: 16.0,
        }
    }

    pub fn heading(content: impl Into<String>, level: u8) -> Self {
        Self::Heading {
            content: content.into(),
            level,
        }
    }

    pub fn button(label: impl Into<String>) -> Self {
        Self::Button {
            label: label.into(),
        }
    }

    pub fn vstack(gap: f32, children: Vec<RenderNode>) -> Self {
        Self::Stack {
            direction: StackDirection::Vertical,
            gap,
            children,
        }
    }

    pub fn hstack(gap: f32, children: Vec<RenderNode>) -> Self {
        Self::Stack {
            direction: StackDirection::Horizontal,
            gap,
            children,
        }
    }

    /// Dispatch to the matching visitor method
    pub fn accept<V: RenderVisitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            Self::Text { content, font_size } => visitor.visit_text(content, *font_size),
            Self::Heading { content, level } => visitor.visit_heading(content, *level),
            Self::Image { width, height } => visitor.visit_image(*width, *height),
            Self::Avatar { size } => visitor.visit_avatar(*size),
            Self::Button { label } => visitor.visit_button(label),
            Self::Stack {
                direction,
                gap,
                children,
            } => visitor.visit_stack(*direction, *gap, children),
            Self::Spacer => visitor.visit_spacer(),
        }
    }
}

/// Visitor over a [`RenderNode`] tree
///
/// Stacks hand their children to the visitor, which decides whether and how
/// to recurse.
pub trait RenderVisitor {
    type Output;

    fn visit_text(&mut self, content: &str, font_size: f32) -> Self::Output;
    fn visit_heading(&mut self, content: &str, level: u8) -> Self::Output;
    fn visit_image(&mut self, width: f32, height: f32) -> Self::Output;
    fn visit_avatar(&mut self, size: f32) -> Self::Output;
    fn visit_button(&mut self, label: &str) -> Self::Output;
    fn visit_stack(
        &mut self,
        direction: StackDirection,
        gap: f32,
        children: &[RenderNode],
    ) -> Self::Output;
    fn visit_spacer(&mut self) -> Self::Output;
}

/// Placeholder tree
#[derive(Clone, Debug, PartialEq)]
pub enum SkeletonNode {
    /// Text bar; `width` is a fraction of the available width
    Line { width: f32, height: f32 },
    Block { width: f32, height: f32 },
    Circle { diameter: f32 },
    Group {
        direction: StackDirection,
        gap: f32,
        children: Vec<SkeletonNode>,
    },
}

impl SkeletonNode {
    /// Number of leaf placeholders
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Group { children, .. } => children.iter().map(Self::leaf_count).sum(),
            _ => 1,
        }
    }
}

/// Short last line of a multi-line paragraph
const LAST_LINE_WIDTH: f32 = 0.6;
const HEADING_WIDTH: f32 = 0.5;
const BUTTON_HEIGHT: f32 = 36.0;
const BUTTON_PADDING: f32 = 32.0;
const CHAR_WIDTH: f32 = 8.0;

/// Builds a [`SkeletonNode`] tree from content
#[derive(Debug, Default)]
pub struct SkeletonBuilder;

impl SkeletonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skeleton for a content tree; `None` when nothing is left to draw
    pub fn build(node: &RenderNode) -> Option<SkeletonNode> {
        node.accept(&mut Self::new())
    }

    fn lines(count: usize, height: f32) -> Option<SkeletonNode> {
        let mut bars: SmallVec<[SkeletonNode; 4]> = (0..count)
            .map(|_| SkeletonNode::Line { width: 1.0, height })
            .collect();
        if count > 1 {
            if let Some(SkeletonNode::Line { width, .. }) = bars.last_mut() {
                *width = LAST_LINE_WIDTH;
            }
        }
        match bars.len() {
            0 => None,
            1 => bars.pop(),
            _ => Some(SkeletonNode::Group {
                direction: StackDirection::Vertical,
                gap: height * 0.5,
                children: bars.into_vec(),
            }),
        }
    }
}

impl RenderVisitor for SkeletonBuilder {
    type Output = Option<SkeletonNode>;

    fn visit_text(&mut self, content: &str, font_size: f32) -> Self::Output {
        let count = content.lines().filter(|line| !line.trim().is_empty()).count();
        Self::lines(count, font_size)
    }

    fn visit_heading(&mut self, content: &str, level: u8) -> Self::Output {
        if content.trim().is_empty() {
            return None;
        }
        let height = (32.0 - 4.0 * f32::from(level.saturating_sub(1))).max(16.0);
        Some(SkeletonNode::Line {
            width: HEADING_WIDTH,
            height,
        })
    }

    fn visit_image(&mut self, width: f32, height: f32) -> Self::Output {
        Some(SkeletonNode::Block { width, height })
    }

    fn visit_avatar(&mut self, size: f32) -> Self::Output {
        Some(SkeletonNode::Circle { diameter: size })
    }

    fn visit_button(&mut self, label: &str) -> Self::Output {
        Some(SkeletonNode::Block {
            width: label.chars().count() as f32 * CHAR_WIDTH + BUTTON_PADDING,
            height: BUTTON_HEIGHT,
        })
    }

    fn visit_stack(
        &mut self,
        direction: StackDirection,
        gap: f32,
        children: &[RenderNode],
    ) -> Self::Output {
        let children: Vec<SkeletonNode> = children
            .iter()
            .filter_map(|child| child.accept(self))
            .collect();

        if children.is_empty() {
            tracing::trace!("SkeletonBuilder - dropping stack with nothing to draw");
            return None;
        }
        Some(SkeletonNode::Group {
            direction,
            gap,
            children,
        })
    }

    fn visit_spacer(&mut self) -> Self::Output {
        None
    }
}
