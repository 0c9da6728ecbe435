//! The scene registry.
//!
//! A [`Scene`] is the sole owner of every placed entity, held in an arena of
//! [`SceneObject`]s keyed by stable [`ObjectId`]s. Identity assignment is
//! monotonic and never reused within a session, so the engine's element and
//! source views (plain id lists) can never dangle into a recycled slot.

use std::fmt;

use serde::{Deserialize, Serialize};

use beamline_geometry::{Point3, Vec3};

use crate::element::{
    Camera, ConcaveLens, ConvexLens, Iris, Mirror, OpticalElement, Slit, DEFAULT_IRIS_RADIUS,
    DEFAULT_PLATE_SIZE,
};
use crate::source::Source;

/// Stable identity of a placed object, unique within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectId(u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The placeable object kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObjectKind {
    Source,
    Mirror,
    ConvexLens,
    ConcaveLens,
    Iris,
    Slit,
    Camera,
}

impl ObjectKind {
    pub fn label(&self) -> &'static str {
        match self {
            ObjectKind::Source => "Source",
            ObjectKind::Mirror => "Mirror",
            ObjectKind::ConvexLens => "Convex lens",
            ObjectKind::ConcaveLens => "Concave lens",
            ObjectKind::Iris => "Iris",
            ObjectKind::Slit => "Slit",
            ObjectKind::Camera => "Camera",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An object is either an emitting source or an optical element, never
/// both.
enum Body {
    Source(Source),
    Element(Box<dyn OpticalElement>),
}

/// One placed entity: identity, display name, kind tag, selection state,
/// and the source or element itself.
pub struct SceneObject {
    id: ObjectId,
    name: String,
    kind: ObjectKind,
    selected: bool,
    body: Body,
}

impl SceneObject {
    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn as_source(&self) -> Option<&Source> {
        match &self.body {
            Body::Source(source) => Some(source),
            Body::Element(_) => None,
        }
    }

    pub fn as_source_mut(&mut self) -> Option<&mut Source> {
        match &mut self.body {
            Body::Source(source) => Some(source),
            Body::Element(_) => None,
        }
    }

    pub fn as_element(&self) -> Option<&dyn OpticalElement> {
        match &self.body {
            Body::Source(_) => None,
            Body::Element(element) => Some(element.as_ref()),
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut (dyn OpticalElement + 'static)> {
        match &mut self.body {
            Body::Source(_) => None,
            Body::Element(element) => Some(element.as_mut()),
        }
    }

    pub fn position(&self) -> Point3 {
        match &self.body {
            Body::Source(source) => source.position(),
            Body::Element(element) => element.position(),
        }
    }
}

/// Ownership registry of all placed sources and elements.
pub struct Scene {
    objects: Vec<SceneObject>,
    next_id: u32,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            next_id: 1,
        }
    }

    fn allocate_id(&mut self) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Place a new object of the given kind with its fixed defaults.
    pub fn add(&mut self, kind: ObjectKind, position: Point3, orientation: Vec3) -> ObjectId {
        let id = self.allocate_id();
        let body = match kind {
            ObjectKind::Source => Body::Source(Source::new(position, orientation)),
            ObjectKind::Mirror => Body::Element(Box::new(Mirror::new(position, orientation))),
            ObjectKind::ConvexLens => {
                Body::Element(Box::new(ConvexLens::new(position, orientation, 0.02, 0.1)))
            }
            ObjectKind::ConcaveLens => {
                Body::Element(Box::new(ConcaveLens::new(position, orientation, 0.02, 0.1)))
            }
            ObjectKind::Iris => Body::Element(Box::new(Iris::new(
                position,
                orientation,
                DEFAULT_IRIS_RADIUS,
                DEFAULT_PLATE_SIZE,
            ))),
            ObjectKind::Slit => Body::Element(Box::new(Slit::new(
                position,
                orientation,
                DEFAULT_PLATE_SIZE,
                0.01,
                1e-4,
                1,
                2e-4,
            ))),
            ObjectKind::Camera => Body::Element(Box::new(Camera::new(position, orientation))),
        };
        self.objects.push(SceneObject {
            id,
            name: format!("{} {}", kind.label(), id),
            kind,
            selected: false,
            body,
        });
        id
    }

    /// Insert a pre-configured source.
    pub fn insert_source(&mut self, source: Source) -> ObjectId {
        let id = self.allocate_id();
        self.objects.push(SceneObject {
            id,
            name: format!("{} {}", ObjectKind::Source.label(), id),
            kind: ObjectKind::Source,
            selected: false,
            body: Body::Source(source),
        });
        id
    }

    /// Insert a pre-configured element; the kind tag comes from the element
    /// itself.
    pub fn insert_element(&mut self, element: Box<dyn OpticalElement>) -> ObjectId {
        let id = self.allocate_id();
        let kind = element.kind();
        self.objects.push(SceneObject {
            id,
            name: format!("{} {}", kind.label(), id),
            kind,
            selected: false,
            body: Body::Element(element),
        });
        id
    }

    /// Remove one object. Its id is never reused.
    pub fn remove(&mut self, id: ObjectId) -> bool {
        let before = self.objects.len();
        self.objects.retain(|obj| obj.id != id);
        self.objects.len() != before
    }

    /// Remove everything and restart identity assignment.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.next_id = 1;
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|obj| obj.id == id)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|obj| obj.id == id)
    }

    /// Single selection: selects `id`, deselects everything else.
    pub fn select(&mut self, id: ObjectId) {
        for obj in &mut self.objects {
            obj.selected = obj.id == id;
        }
    }

    pub fn clear_selection(&mut self) {
        for obj in &mut self.objects {
            obj.selected = false;
        }
    }

    pub fn selected(&self) -> Option<ObjectId> {
        self.objects.iter().find(|obj| obj.selected).map(|obj| obj.id)
    }

    /// Ids of all emitting sources.
    pub fn sources(&self) -> Vec<ObjectId> {
        self.objects
            .iter()
            .filter(|obj| matches!(obj.body, Body::Source(_)))
            .map(|obj| obj.id)
            .collect()
    }

    /// Ids of all elements eligible for ray/field interaction.
    pub fn elements(&self) -> Vec<ObjectId> {
        self.objects
            .iter()
            .filter(|obj| matches!(obj.body, Body::Element(_)))
            .map(|obj| obj.id)
            .collect()
    }

    /// Ids of the sensor subset.
    pub fn cameras(&self) -> Vec<ObjectId> {
        self.objects
            .iter()
            .filter(|obj| obj.kind == ObjectKind::Camera)
            .map(|obj| obj.id)
            .collect()
    }

    pub fn source(&self, id: ObjectId) -> Option<&Source> {
        self.object(id).and_then(SceneObject::as_source)
    }

    pub fn source_mut(&mut self, id: ObjectId) -> Option<&mut Source> {
        self.object_mut(id).and_then(SceneObject::as_source_mut)
    }

    pub fn element(&self, id: ObjectId) -> Option<&dyn OpticalElement> {
        self.object(id).and_then(SceneObject::as_element)
    }

    pub fn element_mut(&mut self, id: ObjectId) -> Option<&mut (dyn OpticalElement + 'static)> {
        self.object_mut(id).and_then(SceneObject::as_element_mut)
    }
}
