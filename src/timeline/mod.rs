//! Scroll-driven property animation.
//!
//! Each tween binds a set of property targets to a [`ScrollTrigger`]. On every
//! update each touched property is rebuilt from its base value: scrub tweens add
//! `(to - from) * progress`, then engaged toggles (in registration order) replace
//! the result with their end value. Properties are therefore pure functions of
//! the scroll offset.

mod property;
mod trigger;

pub use property::{Animatable, Channel, Property, Target, Value};
pub use trigger::{Edge, Marker, ScrollSpan, ScrollTrigger, ToggleLatch, TriggerMode};

use crate::page::PageLayout;
use trigger::marker_offset;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TimelineError {
    #[error("trigger anchor '{0}' not found in page layout")]
    UnknownAnchor(String),
    #[error("property {0} is not animatable")]
    UnknownProperty(Property),
    #[error("value kind for {0} does not match the property")]
    KindMismatch(Property),
    #[error("tween '{0}' has no targets")]
    Empty(String),
}

#[derive(Debug, Clone)]
struct Track {
    property: Property,
    from: Value,
    to: Value,
}

#[derive(Debug, Clone)]
struct Tween {
    label: String,
    trigger: ScrollTrigger,
    tracks: Vec<Track>,
    latch: ToggleLatch,
    progress: f32,
}

#[derive(Debug, Default)]
pub struct Timeline {
    tweens: Vec<Tween>,
    bases: Vec<(Property, Value)>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Register a tween animating each `(property, end value)` pair.
    ///
    /// The current value of every property is captured as its start value.
    pub fn to<I>(
        &mut self,
        host: &dyn Animatable,
        layout: &PageLayout,
        label: &str,
        trigger: ScrollTrigger,
        targets: I,
    ) -> Result<(), TimelineError>
    where
        I: IntoIterator<Item = (Property, Value)>,
    {
        if layout.bounds(&trigger.anchor, 1.0).is_none() {
            return Err(TimelineError::UnknownAnchor(trigger.anchor.to_string()));
        }

        let tracks = targets
            .into_iter()
            .map(|(property, to)| {
                let from = host
                    .get(property)
                    .ok_or(TimelineError::UnknownProperty(property))?;
                if !from.same_kind(&to) {
                    return Err(TimelineError::KindMismatch(property));
                }
                Ok(Track { property, from, to })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if tracks.is_empty() {
            return Err(TimelineError::Empty(label.to_string()));
        }

        for track in &tracks {
            if !self.bases.iter().any(|(p, _)| *p == track.property) {
                self.bases.push((track.property, track.from));
            }
        }

        log::debug!(
            "registered {:?} tween '{}' ({} tracks, {} -> {})",
            trigger.mode,
            label,
            tracks.len(),
            trigger.start,
            trigger.end
        );

        self.tweens.push(Tween {
            label: label.to_string(),
            trigger,
            tracks,
            latch: ToggleLatch::default(),
            progress: 0.0,
        });
        Ok(())
    }

    /// Scroll span of the tween registered under `label`
    pub fn span(&self, label: &str, layout: &PageLayout, viewport_height: f32) -> Option<ScrollSpan> {
        self.tweens
            .iter()
            .find(|t| t.label == label)
            .and_then(|t| Self::span_of(t, layout, viewport_height))
    }

    /// Progress recorded for `label` at the last update
    pub fn progress(&self, label: &str) -> Option<f32> {
        self.tweens.iter().find(|t| t.label == label).map(|t| t.progress)
    }

    fn span_of(tween: &Tween, layout: &PageLayout, viewport_height: f32) -> Option<ScrollSpan> {
        let anchor = &tween.trigger.anchor;
        Some(ScrollSpan {
            start: marker_offset(layout, anchor, tween.trigger.start, viewport_height)?,
            end: marker_offset(layout, anchor, tween.trigger.end, viewport_height)?,
        })
    }

    /// Recompute every animated property for scroll `offset` and write it to `host`.
    ///
    /// Anchors are looked up by id in `layout`. A tween whose anchor is missing
    /// keeps its last progress.
    pub fn update(
        &mut self,
        layout: &PageLayout,
        viewport_height: f32,
        offset: f32,
        host: &mut dyn Animatable,
    ) {
        for tween in &mut self.tweens {
            let Some(span) = Self::span_of(tween, layout, viewport_height) else {
                log::warn!(
                    "tween '{}' anchor '{}' not in layout, keeping progress {:.2}",
                    tween.label,
                    tween.trigger.anchor,
                    tween.progress
                );
                continue;
            };
            tween.progress = match tween.trigger.mode {
                TriggerMode::Scrub => span.progress(offset),
                TriggerMode::Toggle => {
                    if tween.latch.update(offset, span.start) {
                        log::debug!(
                            "toggle '{}' {} at offset {:.1}",
                            tween.label,
                            if tween.latch.is_engaged() { "engaged" } else { "released" },
                            offset
                        );
                    }
                    if tween.latch.is_engaged() {
                        1.0
                    } else {
                        0.0
                    }
                }
            };
        }

        for &(property, base) in &self.bases {
            let mut value = base;
            for tween in self.tweens.iter().filter(|t| t.trigger.mode == TriggerMode::Scrub) {
                for track in tween.tracks.iter().filter(|t| t.property == property) {
                    if let Some(next) = value.offset_by(track.from, track.to, tween.progress) {
                        value = next;
                    }
                }
            }
            for tween in self
                .tweens
                .iter()
                .filter(|t| t.trigger.mode == TriggerMode::Toggle && t.latch.is_engaged())
            {
                for track in tween.tracks.iter().filter(|t| t.property == property) {
                    value = track.to;
                }
            }
            if !host.set(property, value) {
                log::warn!("host rejected value for {}", property);
            }
        }

        log::trace!("timeline evaluated at offset {:.1}", offset);
    }
}
