//! Application state built once at startup and threaded through the event
//! handlers and the frame loop.

use std::f32::consts::PI;

use crate::camera::PerspectiveCamera;
use crate::controls::OrbitControls;
use crate::core::{InputAction, ScrollTarget, Viewport};
use crate::frame::FrameInfo;
use crate::math::Color;
use crate::page::{Anchor, PageLayout, ScrollState};
use crate::scene::{Scene, ShowcaseNodes};
use crate::timeline::{
    Animatable, Channel, Marker, Property, ScrollTrigger, Target, Timeline, TimelineError, Value,
};

/// Everything the timeline animates: scene nodes and the camera
#[derive(Debug, Clone)]
pub struct Stage {
    pub scene: Scene,
    pub camera: PerspectiveCamera,
}

impl Animatable for Stage {
    fn get(&self, property: Property) -> Option<Value> {
        match property.target {
            Target::Node(_) => self.scene.get(property),
            Target::Camera => self.camera.channel(property.channel),
        }
    }

    fn set(&mut self, property: Property, value: Value) -> bool {
        match property.target {
            Target::Node(_) => self.scene.set(property, value),
            Target::Camera => self.camera.set_channel(property.channel, value),
        }
    }
}

pub struct AppState {
    pub stage: Stage,
    pub nodes: ShowcaseNodes,
    pub controls: OrbitControls,
    pub timeline: Timeline,
    pub page: PageLayout,
    pub viewport: Viewport,
    pub scroll: ScrollState,
    section: Option<String>,
}

impl AppState {
    /// Build the scene, camera, controls and every scroll binding, then
    /// evaluate the timeline once at the top of the page.
    pub fn bootstrap(viewport: Viewport, page: PageLayout) -> Result<Self, TimelineError> {
        let (scene, nodes) = Scene::showcase();
        let camera = PerspectiveCamera::new(viewport.aspect());
        let mut stage = Stage { scene, camera };
        let mut timeline = Timeline::new();

        register_scroll_animations(&mut timeline, &stage, &page, nodes)?;
        register_visibility_toggles(&mut timeline, &stage, &page, nodes)?;

        let scroll = ScrollState::new(page.max_scroll(viewport.height));
        timeline.update(&page, viewport.height, scroll.offset(), &mut stage);

        log::info!(
            "bootstrapped {} nodes, {} scroll bindings, document {:.0}px tall",
            stage.scene.nodes.len(),
            timeline.len(),
            page.document_height(viewport.height)
        );

        let mut state = Self {
            stage,
            nodes,
            controls: OrbitControls::new(),
            timeline,
            page,
            viewport,
            scroll,
            section: None,
        };
        state.track_section();
        Ok(state)
    }

    pub fn with_controls(mut self, controls: OrbitControls) -> Self {
        self.controls = controls;
        self
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.stage.camera
    }

    pub fn scene(&self) -> &Scene {
        &self.stage.scene
    }

    /// Re-evaluate every scroll binding at the current offset
    pub fn refresh(&mut self) {
        self.timeline.update(
            &self.page,
            self.viewport.height,
            self.scroll.offset(),
            &mut self.stage,
        );
        self.track_section();
    }

    pub fn scroll_by(&mut self, delta: f32) -> bool {
        let changed = self.scroll.scroll_by(delta);
        if changed {
            self.refresh();
        }
        changed
    }

    pub fn scroll_to(&mut self, offset: f32) -> bool {
        let changed = self.scroll.scroll_to(offset);
        if changed {
            self.refresh();
        }
        changed
    }

    pub fn scroll_to_end(&mut self) -> bool {
        self.scroll_to(self.scroll.max())
    }

    /// New viewport: camera aspect, scroll range and triggers follow
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.stage.camera.set_aspect(viewport.aspect());
        self.scroll.set_max(self.page.max_scroll(viewport.height));
        self.refresh();
    }

    /// Per-frame update: controls damping first, then idle motion
    pub fn tick(&mut self, frame: &FrameInfo) {
        self.controls.update(&mut self.stage.camera);
        self.stage.scene.apply_idle_motion(frame.time);
    }

    pub fn apply(&mut self, action: InputAction) {
        match action {
            InputAction::ScrollBy(delta) => {
                self.scroll_by(delta);
            }
            InputAction::ScrollTo(ScrollTarget::Home) => {
                self.scroll_to(0.0);
            }
            InputAction::ScrollTo(ScrollTarget::End) => {
                self.scroll_to_end();
            }
            InputAction::Orbit(dx, dy) => self.controls.rotate(dx, dy, self.viewport.height),
            InputAction::Pan(dx, dy) => {
                self.controls
                    .pan(dx, dy, self.viewport.height, &self.stage.camera)
            }
            InputAction::Dolly(steps) => self.controls.dolly(steps),
            InputAction::Quit => {}
        }
    }

    /// Id of the block under the viewport's vertical center
    pub fn section_at_center(&self) -> Option<&str> {
        let vh = self.viewport.height;
        self.page.block_at(self.scroll.offset() + vh * 0.5, vh)
    }

    fn track_section(&mut self) {
        let current = self.section_at_center().map(str::to_string);
        if current != self.section {
            log::debug!(
                "section {} at offset {:.0}",
                current.as_deref().unwrap_or("-"),
                self.scroll.offset()
            );
            self.section = current;
        }
    }
}

fn uniform_scale(id: crate::scene::NodeId, value: f32) -> [(Property, Value); 3] {
    Channel::SCALE.map(|c| (Property::node(id, c), Value::Scalar(value)))
}

/// Scrub bindings: per-section transforms and colors, then whole-document
/// camera dolly and spin
pub fn register_scroll_animations(
    timeline: &mut Timeline,
    stage: &Stage,
    page: &PageLayout,
    nodes: ShowcaseNodes,
) -> Result<(), TimelineError> {
    let region = |id: &str| {
        ScrollTrigger::scrub(Anchor::block(id), Marker::TOP_CENTER, Marker::BOTTOM_CENTER)
    };
    let document = || ScrollTrigger::scrub(Anchor::Document, Marker::TOP_TOP, Marker::BOTTOM_BOTTOM);
    let node = Property::node;

    let cube = nodes.cube;
    timeline.to(
        stage,
        page,
        "cube-rotation",
        region("section1"),
        [
            (node(cube, Channel::RotationX), Value::Scalar(PI * 2.0)),
            (node(cube, Channel::RotationY), Value::Scalar(PI * 2.0)),
        ],
    )?;
    timeline.to(stage, page, "cube-scale", region("section1"), uniform_scale(cube, 1.5))?;

    let sphere = nodes.sphere;
    timeline.to(
        stage,
        page,
        "sphere-rise",
        region("section2"),
        [(node(sphere, Channel::PositionY), Value::Scalar(1.5))],
    )?;
    timeline.to(
        stage,
        page,
        "sphere-material",
        region("section2"),
        [
            (node(sphere, Channel::Color), Value::Color(Color::from_hex(0xffff00))),
            (node(sphere, Channel::Emissive), Value::Color(Color::from_hex(0x444400))),
        ],
    )?;
    timeline.to(stage, page, "sphere-scale", region("section2"), uniform_scale(sphere, 1.3))?;

    let torus = nodes.torus;
    timeline.to(
        stage,
        page,
        "torus-rotation",
        region("section3"),
        [
            (node(torus, Channel::RotationX), Value::Scalar(PI * 2.0)),
            (node(torus, Channel::RotationZ), Value::Scalar(PI * 2.0)),
        ],
    )?;
    timeline.to(
        stage,
        page,
        "torus-material",
        region("section3"),
        [
            (node(torus, Channel::Color), Value::Color(Color::from_hex(0xff00ff))),
            (node(torus, Channel::Emissive), Value::Color(Color::from_hex(0x440044))),
        ],
    )?;
    timeline.to(
        stage,
        page,
        "torus-drop",
        region("section3"),
        [(node(torus, Channel::PositionY), Value::Scalar(-1.0))],
    )?;

    timeline.to(
        stage,
        page,
        "camera-dolly",
        document(),
        [(Property::camera(Channel::PositionZ), Value::Scalar(3.0))],
    )?;
    timeline.to(
        stage,
        page,
        "global-spin",
        document(),
        nodes
            .all()
            .map(|id| (node(id, Channel::RotationY), Value::Scalar(PI * 4.0))),
    )?;
    Ok(())
}

/// Toggle bindings hiding each node in turn as the page advances
pub fn register_visibility_toggles(
    timeline: &mut Timeline,
    stage: &Stage,
    page: &PageLayout,
    nodes: ShowcaseNodes,
) -> Result<(), TimelineError> {
    timeline.to(
        stage,
        page,
        "cube-hide",
        ScrollTrigger::toggle(Anchor::block("section2"), Marker::TOP_CENTER),
        uniform_scale(nodes.cube, 0.0),
    )?;
    timeline.to(
        stage,
        page,
        "sphere-hide",
        ScrollTrigger::toggle(Anchor::block("section3"), Marker::TOP_CENTER),
        uniform_scale(nodes.sphere, 0.0),
    )?;
    timeline.to(
        stage,
        page,
        "torus-hide",
        ScrollTrigger::toggle(Anchor::Document, Marker::BOTTOM_BOTTOM),
        uniform_scale(nodes.torus, 0.0),
    )?;
    Ok(())
}
