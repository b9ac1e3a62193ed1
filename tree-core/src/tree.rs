use crate::config::GlobalConfig;
use crate::types::BranchId;
use glam::Vec2;
use rand::Rng;

/// Terminal classification of a branch, fixed at construction.
///
/// A leaf carries the radius of its drawn disc; only leaves have one.
#[derive(Clone, Debug, PartialEq)]
pub enum BranchKind {
    Internal,
    Leaf { leaf_size: f32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Branch {
    /// Direction in degrees from the branch's origin point.
    pub angle: f32,
    pub length: f32,
    pub width: f32,
    pub kind: BranchKind,
    /// Ordered child ids; the order fixes left-to-right sector assignment.
    pub children: Vec<BranchId>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tree {
    pub nodes: Vec<Branch>,
}

impl Branch {
    /// Builds a branch, clamping `width` up to the configured floor.
    ///
    /// A branch whose `length` is at or below the termination threshold
    /// is classified as a leaf and samples its disc radius here; the
    /// classification never changes afterwards.
    pub fn new(
        angle: f32,
        length: f32,
        width: f32,
        global: &GlobalConfig,
        rng: &mut impl Rng,
    ) -> Self {
        let kind = if length <= global.min_branch_length {
            BranchKind::Leaf {
                leaf_size: rng.random_range(global.leaf_size_min..=global.leaf_size_max),
            }
        } else {
            BranchKind::Internal
        };

        Self {
            angle,
            length,
            width: width.max(global.min_branch_width),
            kind,
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, BranchKind::Leaf { .. })
    }

    pub fn leaf_size(&self) -> Option<f32> {
        match self.kind {
            BranchKind::Leaf { leaf_size } => Some(leaf_size),
            BranchKind::Internal => None,
        }
    }

    /// Unit direction vector for `angle`.
    ///
    /// Angles are degrees in a canvas-style y-down world, so 270 points
    /// straight up.
    pub fn direction(&self) -> Vec2 {
        let rad = self.angle.to_radians();
        Vec2::new(rad.cos(), rad.sin())
    }

    /// End point of the branch segment starting at `start`. Children are
    /// drawn from this point.
    pub fn end_point(&self, start: Vec2) -> Vec2 {
        start + self.direction() * self.length
    }
}

impl Tree {
    pub fn new(root: Branch) -> Self {
        Self { nodes: vec![root] }
    }

    pub fn root(&self) -> &Branch {
        &self.nodes[0]
    }

    pub fn add_child(&mut self, parent: BranchId, branch: Branch) -> BranchId {
        let id: BranchId = self.nodes.len();
        self.nodes.push(branch);
        self.nodes[parent].children.push(id);
        id
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|b| b.is_leaf()).count()
    }

    /// Longest root-to-branch path, in edges.
    pub fn max_depth(&self) -> usize {
        self.depth_below(0)
    }

    fn depth_below(&self, id: BranchId) -> usize {
        self.nodes[id]
            .children
            .iter()
            .map(|&child| 1 + self.depth_below(child))
            .max()
            .unwrap_or(0)
    }
}
