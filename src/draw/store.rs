//! In-memory annotation store.

use super::annotation::{Annotation, AnnotationId, Point, StrokeStyle};
use crate::input::Tool;
use log::debug;
use std::collections::HashMap;

/// Ordered collection of annotations keyed by id.
///
/// Iteration order is draw order (first = bottom layer, last = top layer).
/// Operations addressing an id that is not present are silent no-ops.
#[derive(Debug, Clone, Default)]
pub struct AnnotationStore {
    annotations: Vec<Annotation>,
    /// Position of each id in `annotations`
    index: HashMap<AnnotationId, usize>,
    next_seq: u64,
}

impl AnnotationStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new annotation at `start` and returns its id.
    pub fn create(
        &mut self,
        tool: Tool,
        start: Point,
        style: &StrokeStyle,
        author: &str,
        timestamp: i64,
    ) -> AnnotationId {
        let id = self.fresh_id(timestamp);
        debug!("Creating annotation {} with {}", id, tool);
        self.push(Annotation::begin(
            id.clone(),
            tool,
            start,
            style,
            author,
            timestamp,
        ));
        id
    }

    /// Appends a point to an existing annotation.
    ///
    /// Returns the previous last point so callers can paint the new segment.
    pub fn append(&mut self, id: &str, point: Point) -> Option<Point> {
        let annotation = self.get_mut(id)?;
        let previous = annotation.points.last().copied();
        annotation.points.push(point);
        previous
    }

    pub fn get(&self, id: &str) -> Option<&Annotation> {
        self.index.get(id).map(|&pos| &self.annotations[pos])
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Annotation> {
        let pos = *self.index.get(id)?;
        self.annotations.get_mut(pos)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Removes and returns the annotation with the given id, if any.
    pub fn remove(&mut self, id: &str) -> Option<Annotation> {
        let pos = self.index.remove(id)?;
        let removed = self.annotations.remove(pos);
        for annotation in &self.annotations[pos..] {
            if let Some(slot) = self.index.get_mut(&annotation.id) {
                *slot -= 1;
            }
        }
        Some(removed)
    }

    /// Removes every annotation.
    pub fn clear(&mut self) {
        self.annotations.clear();
        self.index.clear();
    }

    /// Replaces the contents wholesale.
    ///
    /// Records without points are dropped, records with an empty or duplicate
    /// id get a fresh one. Returns the number of records dropped.
    pub fn replace_all(&mut self, annotations: Vec<Annotation>) -> usize {
        self.clear();
        self.annotations.reserve(annotations.len());
        self.index.reserve(annotations.len());

        let mut dropped = 0;
        for mut annotation in annotations {
            if annotation.points.is_empty() {
                dropped += 1;
                continue;
            }
            if annotation.id.is_empty() || self.contains(&annotation.id) {
                annotation.id = self.fresh_id(annotation.timestamp);
            }
            annotation.opacity = annotation.opacity.clamp(0.0, 1.0);
            self.push(annotation);
        }
        dropped
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Annotations in draw order.
    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.annotations.iter()
    }

    /// Annotations in draw order as a slice.
    pub fn as_slice(&self) -> &[Annotation] {
        &self.annotations
    }

    fn push(&mut self, annotation: Annotation) {
        self.index.insert(annotation.id.clone(), self.annotations.len());
        self.annotations.push(annotation);
    }

    fn fresh_id(&mut self, timestamp: i64) -> AnnotationId {
        loop {
            self.next_seq += 1;
            let id = format!("annotation_{}_{}", timestamp, self.next_seq);
            if !self.contains(&id) {
                return id;
            }
        }
    }
}
