//! Interactive branching-tree viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the generation
//! configuration and the last generated tree, and implements
//! [`eframe::App`] to render the tree and edit parameters through an
//! egui UI.

use eframe::App;
use glam::Vec2;
use tracing::warn;
use tree_core::{
    config::Config,
    generator,
    tree::{BranchKind, Tree},
    types::BranchId,
};

const BRANCH_COLOR: egui::Color32 = egui::Color32::from_rgb(0x99, 0x99, 0x00);
const LEAF_COLOR: egui::Color32 = egui::Color32::from_rgb(0x00, 0xff, 0x00);
const GROUND_COLOR: egui::Color32 = egui::Color32::from_rgb(0xc3, 0xb0, 0x91);

/// Main application state for the interactive viewer.
///
/// [`Viewer`] glues together:
/// - The generation core: [`Config`] and the last grown [`Tree`].
/// - UI configuration (pan/zoom camera).
/// - eframe/egui callbacks for drawing and parameter editing.
///
/// Each press of the Generate button validates the configuration and
/// grows a fresh tree; the previous one is discarded on success and kept
/// on failure, with the error shown in the status bar.
///
/// ### Fields
/// - `cfg` - Generation configuration, edited live in the side panel.
/// - `tree` - Last successfully generated tree, if any.
/// - `last_error` - Validation or growth failure from the last attempt.
/// - `rng` - Random number generator feeding every generation request.
/// - `zoom` - Zoom factor for world-to-screen coordinate mapping.
/// - `pan` - Screen-space pan offset in pixels.
pub struct Viewer {
    cfg: Config,
    tree: Option<Tree>,
    last_error: Option<String>,

    rng: rand::rngs::ThreadRng,

    zoom: f32,
    pan: egui::Vec2,
}

impl Viewer {
    /// Creates a new viewer and grows a first tree from the default
    /// configuration.
    ///
    /// The camera starts at 1:1 zoom, panned so the root sits below the
    /// window center and the default upward-growing tree has room.
    pub fn new() -> Self {
        let mut viewer = Self {
            cfg: Config::default(),
            tree: None,
            last_error: None,
            rng: rand::rng(),
            zoom: 1.0,
            pan: egui::vec2(0.0, 180.0),
        };
        viewer.regenerate();
        viewer
    }

    /// Discards the current tree and grows a fresh one from the current
    /// configuration.
    ///
    /// An invalid configuration or exhausted growth leaves the previous
    /// tree in place and surfaces the error in the status bar.
    fn regenerate(&mut self) {
        if let Err(e) = self.cfg.validate() {
            warn!(error = %e, "rejected configuration");
            self.last_error = Some(e.to_string());
            return;
        }

        match generator::generate(&self.cfg, &mut self.rng) {
            Ok(tree) => {
                self.tree = Some(tree);
                self.last_error = None;
            }
            Err(e) => {
                warn!(error = %e, "generation failed");
                self.last_error = Some(e.to_string());
            }
        }
    }

    /// Converts a world-space position to screen-space.
    ///
    /// World coordinates are canvas-style (y grows downward, matching the
    /// branch angle convention), scaled by `zoom`, offset by `pan`, and
    /// centered inside the given `rect`.
    fn world_to_screen(&self, p: Vec2, rect: egui::Rect) -> egui::Pos2 {
        let center = rect.center();
        egui::pos2(
            center.x + p.x * self.zoom + self.pan.x,
            center.y + p.y * self.zoom + self.pan.y,
        )
    }

    /// Converts a screen-space position back to world-space.
    ///
    /// Inverse of [`Viewer::world_to_screen`] up to floating point
    /// rounding, using the same `zoom`, `pan`, and `rect` center.
    fn screen_to_world(&self, p: egui::Pos2, rect: egui::Rect) -> Vec2 {
        let center = rect.center();
        let x = (p.x - center.x - self.pan.x) / self.zoom;
        let y = (p.y - center.y - self.pan.y) / self.zoom;
        Vec2::new(x, y)
    }

    /// Helper to draw a labeled `f32` [`egui::DragValue`].
    fn labeled_drag_f32(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut f32,
        range: std::ops::RangeInclusive<f32>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Builds the top panel UI (generation controls, zoom).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Generate").clicked() {
                    self.regenerate();
                }

                ui.separator();
                ui.add(egui::Slider::new(&mut self.zoom, 0.1..=10.0).text("Zoom"));
            });
        });
    }

    /// Builds the bottom status bar (tree statistics, last error).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if let Some(tree) = &self.tree {
                    ui.label(format!("depth = {}", tree.max_depth()));
                    ui.label(format!("leaves = {}", tree.leaf_count()));
                    ui.label(format!("branches = {}", tree.nodes.len()));
                }

                if let Some(err) = &self.last_error {
                    ui.separator();
                    ui.colored_label(egui::Color32::LIGHT_RED, err.as_str());
                }
            });
        });
    }

    /// Builds the right-hand configuration panel for generation parameters.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(240.0)
            .show(ctx, |ui| {
                ui.heading("Configuration");

                ui.separator();
                ui.label("Global limits");
                Self::labeled_drag_f32(
                    ui,
                    "min branches:",
                    &mut self.cfg.global.min_branches_count,
                    0.0..=10.0,
                    0.1,
                );
                Self::labeled_drag_f32(
                    ui,
                    "max branches:",
                    &mut self.cfg.global.max_branches_count,
                    0.0..=10.0,
                    0.1,
                );
                Self::labeled_drag_f32(
                    ui,
                    "min length:",
                    &mut self.cfg.global.min_branch_length,
                    0.1..=100.0,
                    0.5,
                );
                Self::labeled_drag_f32(
                    ui,
                    "min width:",
                    &mut self.cfg.global.min_branch_width,
                    0.1..=50.0,
                    0.5,
                );
                Self::labeled_drag_f32(
                    ui,
                    "leaf size min:",
                    &mut self.cfg.global.leaf_size_min,
                    0.0..=50.0,
                    0.5,
                );
                Self::labeled_drag_f32(
                    ui,
                    "leaf size max:",
                    &mut self.cfg.global.leaf_size_max,
                    0.0..=50.0,
                    0.5,
                );

                ui.separator();
                ui.label("Root branch");
                Self::labeled_drag_f32(
                    ui,
                    "length:",
                    &mut self.cfg.init.branch_length,
                    1.0..=500.0,
                    1.0,
                );
                Self::labeled_drag_f32(
                    ui,
                    "width:",
                    &mut self.cfg.init.branch_width,
                    1.0..=100.0,
                    0.5,
                );
                Self::labeled_drag_f32(
                    ui,
                    "angle min:",
                    &mut self.cfg.init.branch_angle_min,
                    0.0..=360.0,
                    1.0,
                );
                Self::labeled_drag_f32(
                    ui,
                    "angle max:",
                    &mut self.cfg.init.branch_angle_max,
                    0.0..=360.0,
                    1.0,
                );

                ui.separator();
                ui.label("Child derivation");
                Self::labeled_drag_f32(
                    ui,
                    "angle min:",
                    &mut self.cfg.child.branch_angle_min,
                    -180.0..=180.0,
                    1.0,
                );
                Self::labeled_drag_f32(
                    ui,
                    "angle max:",
                    &mut self.cfg.child.branch_angle_max,
                    -180.0..=180.0,
                    1.0,
                );
                Self::labeled_drag_f32(
                    ui,
                    "length mult min:",
                    &mut self.cfg.child.branch_length_multiplier_min,
                    0.01..=0.99,
                    0.01,
                );
                Self::labeled_drag_f32(
                    ui,
                    "length mult max:",
                    &mut self.cfg.child.branch_length_multiplier_max,
                    0.01..=0.99,
                    0.01,
                );
                Self::labeled_drag_f32(
                    ui,
                    "width mult min:",
                    &mut self.cfg.child.branch_width_multiplier_min,
                    0.01..=2.0,
                    0.01,
                );
                Self::labeled_drag_f32(
                    ui,
                    "width mult max:",
                    &mut self.cfg.child.branch_width_multiplier_max,
                    0.01..=2.0,
                    0.01,
                );

                ui.separator();
                if ui.button("Reset to defaults").clicked() {
                    self.cfg = Config::default();
                }
            });
    }

    /// Builds the central panel where the tree is drawn and the camera is
    /// controlled.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::drag());
            let rect = response.rect;
            let painter = ui.painter_at(rect);

            // Pan with drag.
            if response.dragged() {
                self.pan += response.drag_delta();
            }

            // Zoom around the mouse cursor.
            let scroll = ui.ctx().input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                let pointer_screen = response.hover_pos().unwrap_or(rect.center());
                let world_before = self.screen_to_world(pointer_screen, rect);

                let factor = (1.0 + scroll * 0.001).clamp(0.5, 2.0);
                self.zoom = (self.zoom * factor).clamp(0.1, 10.0);

                let screen_after = self.world_to_screen(world_before, rect);
                self.pan += pointer_screen - screen_after;
            }

            // Ground strip below the root's baseline.
            let base = self.world_to_screen(Vec2::ZERO, rect);
            if base.y < rect.bottom() {
                let ground = egui::Rect::from_min_max(
                    egui::pos2(rect.left(), base.y.max(rect.top())),
                    egui::pos2(rect.right(), rect.bottom()),
                );
                painter.rect_filled(ground, egui::CornerRadius::ZERO, GROUND_COLOR);
            }

            if let Some(tree) = &self.tree {
                self.draw_branch(&painter, rect, tree, 0, Vec2::ZERO);
            }
        });
    }

    /// Draws one branch and, for internal branches, its subtree.
    ///
    /// A leaf is a filled disc of its sampled radius at the branch start
    /// point. An internal branch is a stroked segment from the start
    /// point to [`tree_core::tree::Branch::end_point`]; each child is
    /// drawn from that end point.
    fn draw_branch(
        &self,
        painter: &egui::Painter,
        rect: egui::Rect,
        tree: &Tree,
        id: BranchId,
        start: Vec2,
    ) {
        let branch = &tree.nodes[id];

        match branch.kind {
            BranchKind::Leaf { leaf_size } => {
                let p = self.world_to_screen(start, rect);
                painter.circle_filled(p, (leaf_size * self.zoom).max(1.0), LEAF_COLOR);
            }
            BranchKind::Internal => {
                let end = branch.end_point(start);
                let a = self.world_to_screen(start, rect);
                let b = self.world_to_screen(end, rect);
                painter.line_segment(
                    [a, b],
                    egui::Stroke::new((branch.width * self.zoom).max(1.0), BRANCH_COLOR),
                );

                for &child in &branch.children {
                    self.draw_branch(painter, rect, tree, child, end);
                }
            }
        }
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);
    }
}
