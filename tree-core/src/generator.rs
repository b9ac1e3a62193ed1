//! Recursive stochastic construction of a branching tree.
//!
//! A generation request runs as:
//! 1. [`generate`] — build the root branch from the `init` group and
//!    hand it to `fill_children`.
//! 2. `fill_children` — sample one child count per branch, then grow
//!    exactly that many children in index order.
//! 3. `grow_child` — derive a child from its parent (sector angle,
//!    scaled length and width), append it, and recurse into it.
//!
//! Each child index owns one contiguous angular sector of the parent's
//! total spread, so siblings fan out without exact-angle collisions
//! while staying random within their own sector.

use crate::{
    config::{ChildConfig, Config},
    errors::GrowthError,
    tree::{Branch, Tree},
    types::BranchId,
};
use rand::Rng;
use tracing::debug;

/// Hard cutoff on branch depth.
///
/// Growth terminates because child lengths shrink by a multiplier below 1
/// while the leaf threshold stays fixed; the cutoff turns a configuration
/// that converges too slowly into an error instead of a stack overflow.
pub const MAX_DEPTH: usize = 64;

/// Grows a complete tree from a validated configuration.
///
/// The root branch gets its angle sampled uniformly from the `init`
/// angle range and takes the initial length and width verbatim; every
/// descendant is derived recursively from its parent. The caller supplies
/// the random source, so a seeded generator reproduces a tree exactly.
///
/// Expects a configuration that passed [`Config::validate`]: out-of-order
/// ranges make the uniform sampling panic, and a non-shrinking length
/// multiplier runs into the depth cutoff.
///
/// ### Parameters
/// - `cfg` - Validated generation configuration.
/// - `rng` - Random source used for every sample in this tree.
///
/// ### Returns
/// The generated tree, or [`GrowthError::DepthExceeded`] if recursion
/// passes [`MAX_DEPTH`] before lengths reach the leaf threshold.
pub fn generate(cfg: &Config, rng: &mut impl Rng) -> Result<Tree, GrowthError> {
    let root_angle = rng.random_range(cfg.init.branch_angle_min..=cfg.init.branch_angle_max);
    let root = Branch::new(
        root_angle,
        cfg.init.branch_length,
        cfg.init.branch_width,
        &cfg.global,
        rng,
    );

    let mut tree = Tree::new(root);
    fill_children(&mut tree, 0, cfg, rng, 0)?;

    debug!(
        branches = tree.nodes.len(),
        leaves = tree.leaf_count(),
        depth = tree.max_depth(),
        "generated tree"
    );

    Ok(tree)
}

/// Populates `branch` with a freshly sampled number of children.
///
/// Leaves are skipped entirely and keep an empty children list. The child
/// count is sampled once per branch, uniformly between the configured
/// bounds and rounded, then exactly that many children are grown in index
/// order.
fn fill_children(
    tree: &mut Tree,
    branch: BranchId,
    cfg: &Config,
    rng: &mut impl Rng,
    depth: usize,
) -> Result<(), GrowthError> {
    if tree.nodes[branch].is_leaf() {
        return Ok(());
    }
    if depth >= MAX_DEPTH {
        return Err(GrowthError::DepthExceeded { max: MAX_DEPTH });
    }

    let count = rng
        .random_range(cfg.global.min_branches_count..=cfg.global.max_branches_count)
        .round() as usize;

    for index in 0..count {
        grow_child(tree, branch, index, count, cfg, rng, depth)?;
    }

    Ok(())
}

/// Derives child `index` of `count` from its parent and recurses into it.
///
/// The child's angle comes from its sector, its length and width from the
/// parent's scaled by an independent uniform draw out of the multiplier
/// ranges. The parent's stored width is already clamped, so the child
/// scales from the clamped value.
fn grow_child(
    tree: &mut Tree,
    parent: BranchId,
    index: usize,
    count: usize,
    cfg: &Config,
    rng: &mut impl Rng,
    depth: usize,
) -> Result<(), GrowthError> {
    let (parent_angle, parent_length, parent_width) = {
        let p = &tree.nodes[parent];
        (p.angle, p.length, p.width)
    };

    let angle = sector_angle(parent_angle, index, count, &cfg.child, rng);
    let length = rng.random_range(
        parent_length * cfg.child.branch_length_multiplier_min
            ..=parent_length * cfg.child.branch_length_multiplier_max,
    );
    let width = rng.random_range(
        parent_width * cfg.child.branch_width_multiplier_min
            ..=parent_width * cfg.child.branch_width_multiplier_max,
    );

    let id = tree.add_child(parent, Branch::new(angle, length, width, &cfg.global, rng));
    fill_children(tree, id, cfg, rng, depth + 1)
}

/// Samples a child direction inside its angular sector.
///
/// The parent's total spread (`child.branch_angle_max -
/// child.branch_angle_min`) is split into `count` equal contiguous
/// sectors; child `index` draws uniformly within its own.
fn sector_angle(
    parent_angle: f32,
    index: usize,
    count: usize,
    child: &ChildConfig,
    rng: &mut impl Rng,
) -> f32 {
    let spread = child.branch_angle_max - child.branch_angle_min;
    let sector = spread / count as f32;
    let start = parent_angle + child.branch_angle_min + sector * index as f32;

    rng.random_range(start..=start + sector)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ChildConfig, Config, GlobalConfig, InitConfig};
    use rand::{SeedableRng, rngs::StdRng};

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    /// Configuration with every range collapsed to a single value, so the
    /// whole tree is forced: root 270°/10/4, two children per branch,
    /// children exactly half their parent's size.
    fn forced_config() -> Config {
        Config {
            global: GlobalConfig {
                min_branches_count: 2.0,
                max_branches_count: 2.0,
                min_branch_length: 5.0,
                min_branch_width: 2.0,
                leaf_size_min: 3.0,
                leaf_size_max: 3.0,
            },
            init: InitConfig {
                branch_length: 10.0,
                branch_width: 4.0,
                branch_angle_min: 270.0,
                branch_angle_max: 270.0,
            },
            child: ChildConfig {
                branch_angle_min: -45.0,
                branch_angle_max: 45.0,
                branch_length_multiplier_min: 0.5,
                branch_length_multiplier_max: 0.5,
                branch_width_multiplier_min: 0.5,
                branch_width_multiplier_max: 0.5,
            },
        }
    }

    #[test]
    fn forced_config_produces_the_exact_two_generation_tree() {
        let cfg = forced_config();
        cfg.validate().expect("forced config should be valid");

        let tree = generate(&cfg, &mut rng()).unwrap();

        let root = tree.root();
        assert_eq!(root.angle, 270.0);
        assert_eq!(root.length, 10.0);
        assert_eq!(root.width, 4.0);
        assert!(!root.is_leaf());
        assert_eq!(root.children.len(), 2);

        // Sector 0 is [225, 270], sector 1 is [270, 315].
        for (index, &child_id) in root.children.iter().enumerate() {
            let child = &tree.nodes[child_id];
            let sector_start = 225.0 + 45.0 * index as f32;

            assert!(
                child.angle >= sector_start && child.angle <= sector_start + 45.0,
                "child {index} angle {} outside [{sector_start}, {}]",
                child.angle,
                sector_start + 45.0
            );
            assert_eq!(child.length, 5.0);
            assert_eq!(child.width, 2.0);
            assert!(child.is_leaf());
            assert_eq!(child.leaf_size(), Some(3.0));
            assert!(child.children.is_empty());
        }

        assert_eq!(tree.nodes.len(), 3);
        assert_eq!(tree.max_depth(), 1);
    }

    #[test]
    fn generated_branches_respect_width_floor_and_leaf_rules() {
        let cfg = Config::default();
        let tree = generate(&cfg, &mut rng()).unwrap();

        assert!(tree.nodes.len() > 1);
        for branch in &tree.nodes {
            assert!(branch.width >= cfg.global.min_branch_width);
            assert_eq!(
                branch.is_leaf(),
                branch.length <= cfg.global.min_branch_length
            );

            match branch.leaf_size() {
                Some(size) => {
                    assert!(branch.children.is_empty());
                    assert!(size >= cfg.global.leaf_size_min && size <= cfg.global.leaf_size_max);
                }
                None => assert!(branch.length > cfg.global.min_branch_length),
            }
        }
    }

    #[test]
    fn child_count_stays_within_the_rounded_bounds() {
        let mut cfg = Config::default();
        cfg.global.min_branches_count = 1.0;
        cfg.global.max_branches_count = 3.0;

        let tree = generate(&cfg, &mut rng()).unwrap();

        for branch in tree.nodes.iter().filter(|b| !b.is_leaf()) {
            assert!(
                (1..=3).contains(&branch.children.len()),
                "unexpected child count {}",
                branch.children.len()
            );
        }
    }

    #[test]
    fn children_fan_out_in_contiguous_equal_sectors() {
        let cfg = Config::default();
        let tree = generate(&cfg, &mut rng()).unwrap();

        let spread = cfg.child.branch_angle_max - cfg.child.branch_angle_min;

        for branch in tree.nodes.iter().filter(|b| !b.children.is_empty()) {
            let sector = spread / branch.children.len() as f32;

            for (index, &child_id) in branch.children.iter().enumerate() {
                let start = branch.angle + cfg.child.branch_angle_min + sector * index as f32;
                let child = &tree.nodes[child_id];

                assert!(
                    child.angle >= start - 1e-3 && child.angle <= start + sector + 1e-3,
                    "child {index} angle {} outside sector [{start}, {}]",
                    child.angle,
                    start + sector
                );
            }
        }
    }

    #[test]
    fn same_seed_reproduces_the_same_tree() {
        let cfg = Config::default();

        let a = generate(&cfg, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = generate(&cfg, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);

        let c = generate(&cfg, &mut StdRng::seed_from_u64(8)).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn shrinking_lengths_bound_the_depth() {
        let mut cfg = Config::default();
        cfg.global.min_branches_count = 2.0;
        cfg.global.max_branches_count = 2.0;

        // 80 * 0.85^18 < 5, so nothing survives past depth 18.
        let tree = generate(&cfg, &mut rng()).unwrap();
        assert!(tree.max_depth() <= 18, "depth {} too deep", tree.max_depth());
    }

    #[test]
    fn slow_convergence_hits_the_depth_cutoff() {
        let mut cfg = Config::default();
        cfg.global.min_branches_count = 1.0;
        cfg.global.max_branches_count = 1.0;
        cfg.child.branch_length_multiplier_min = 0.999;
        cfg.child.branch_length_multiplier_max = 0.999;
        cfg.validate().expect("still a valid configuration");

        let err = generate(&cfg, &mut rng()).unwrap_err();
        assert_eq!(err, GrowthError::DepthExceeded { max: MAX_DEPTH });
    }

    #[test]
    fn zero_branch_count_yields_a_childless_internal_root() {
        let mut cfg = Config::default();
        cfg.global.min_branches_count = 0.0;
        cfg.global.max_branches_count = 0.0;

        let tree = generate(&cfg, &mut rng()).unwrap();

        assert_eq!(tree.nodes.len(), 1);
        assert!(!tree.root().is_leaf());
        assert!(tree.root().children.is_empty());
    }

    #[test]
    fn a_root_at_the_threshold_is_a_lone_leaf() {
        let mut cfg = Config::default();
        cfg.init.branch_length = cfg.global.min_branch_length;

        let tree = generate(&cfg, &mut rng()).unwrap();

        assert_eq!(tree.nodes.len(), 1);
        assert!(tree.root().is_leaf());
        assert!(tree.root().children.is_empty());
    }
}
