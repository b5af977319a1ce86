//! Named-field persistence contract
//!
//! The serialization layer above this kernel persists values as flat
//! `(tag, f32)` pairs with per-field defaults. A field equal to its
//! default is omitted on write and restored from the default on read, so
//! the defaults define each type's identity element: a quaternion absent
//! from serialized data reads back as `(0, 0, 0, 1)`.
//!
//! Compound fields use dotted tags (`"origin.x"`).

use crate::matrix::{Mat3, Mat4};
use crate::quaternion::Quat;
use crate::ray::Ray;
use crate::rectangle::Rectangle;
use crate::segment::LineSegment;
use crate::transform::TransformMatrixQuat;
use crate::triangle::Triangle;
use crate::vector::{Vec2, Vec3};
use std::collections::HashMap;

/// Sink for named float fields.
pub trait FieldWriter {
    /// Record `value` under `name`; writers may skip fields equal to
    /// `default`.
    fn write(&mut self, name: &str, value: f32, default: f32);
}

/// Source of named float fields.
pub trait FieldReader {
    /// Value stored under `name`, or `default` when absent.
    fn read(&self, name: &str, default: f32) -> f32;
}

/// A type persistable through the named-field contract.
pub trait Persist: Sized {
    fn write_fields(&self, out: &mut dyn FieldWriter);
    fn read_fields(input: &dyn FieldReader) -> Self;
}

/// Map-backed store implementing both sides of the contract.
#[derive(Clone, Debug, Default)]
pub struct FieldMap {
    fields: HashMap<String, f32>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }
}

impl FieldWriter for FieldMap {
    fn write(&mut self, name: &str, value: f32, default: f32) {
        if value != default {
            self.fields.insert(name.to_owned(), value);
        }
    }
}

impl FieldReader for FieldMap {
    fn read(&self, name: &str, default: f32) -> f32 {
        self.fields.get(name).copied().unwrap_or(default)
    }
}

fn write_vec3(out: &mut dyn FieldWriter, prefix: &str, v: Vec3, default: Vec3) {
    out.write(&format!("{prefix}.x"), v.x, default.x);
    out.write(&format!("{prefix}.y"), v.y, default.y);
    out.write(&format!("{prefix}.z"), v.z, default.z);
}

fn read_vec3(input: &dyn FieldReader, prefix: &str, default: Vec3) -> Vec3 {
    Vec3::new(
        input.read(&format!("{prefix}.x"), default.x),
        input.read(&format!("{prefix}.y"), default.y),
        input.read(&format!("{prefix}.z"), default.z),
    )
}

impl Persist for Vec2 {
    fn write_fields(&self, out: &mut dyn FieldWriter) {
        out.write("x", self.x, 0.0);
        out.write("y", self.y, 0.0);
    }

    fn read_fields(input: &dyn FieldReader) -> Self {
        Self::new(input.read("x", 0.0), input.read("y", 0.0))
    }
}

impl Persist for Vec3 {
    fn write_fields(&self, out: &mut dyn FieldWriter) {
        out.write("x", self.x, 0.0);
        out.write("y", self.y, 0.0);
        out.write("z", self.z, 0.0);
    }

    fn read_fields(input: &dyn FieldReader) -> Self {
        Self::new(
            input.read("x", 0.0),
            input.read("y", 0.0),
            input.read("z", 0.0),
        )
    }
}

impl Persist for Quat {
    fn write_fields(&self, out: &mut dyn FieldWriter) {
        out.write("x", self.x, 0.0);
        out.write("y", self.y, 0.0);
        out.write("z", self.z, 0.0);
        out.write("w", self.w, 1.0);
    }

    fn read_fields(input: &dyn FieldReader) -> Self {
        Self::new(
            input.read("x", 0.0),
            input.read("y", 0.0),
            input.read("z", 0.0),
            input.read("w", 1.0),
        )
    }
}

impl Persist for Mat3 {
    fn write_fields(&self, out: &mut dyn FieldWriter) {
        for (i, row) in self.m.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                let default = if i == j { 1.0 } else { 0.0 };
                out.write(&format!("m{i}{j}"), value, default);
            }
        }
    }

    fn read_fields(input: &dyn FieldReader) -> Self {
        let mut out = Self::IDENTITY;
        for i in 0..3 {
            for j in 0..3 {
                let default = if i == j { 1.0 } else { 0.0 };
                out.m[i][j] = input.read(&format!("m{i}{j}"), default);
            }
        }
        out
    }
}

impl Persist for Mat4 {
    fn write_fields(&self, out: &mut dyn FieldWriter) {
        for (i, row) in self.m.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                let default = if i == j { 1.0 } else { 0.0 };
                out.write(&format!("m{i}{j}"), value, default);
            }
        }
    }

    fn read_fields(input: &dyn FieldReader) -> Self {
        let mut out = Self::IDENTITY;
        for i in 0..4 {
            for j in 0..4 {
                let default = if i == j { 1.0 } else { 0.0 };
                out.m[i][j] = input.read(&format!("m{i}{j}"), default);
            }
        }
        out
    }
}

impl Persist for Ray {
    fn write_fields(&self, out: &mut dyn FieldWriter) {
        write_vec3(out, "origin", self.origin, Vec3::ZERO);
        write_vec3(out, "direction", self.direction, Vec3::ZERO);
    }

    fn read_fields(input: &dyn FieldReader) -> Self {
        Self::new(
            read_vec3(input, "origin", Vec3::ZERO),
            read_vec3(input, "direction", Vec3::ZERO),
        )
    }
}

impl Persist for LineSegment {
    fn write_fields(&self, out: &mut dyn FieldWriter) {
        write_vec3(out, "origin", self.origin, Vec3::ZERO);
        write_vec3(out, "direction", self.direction, Vec3::ZERO);
        out.write("extent", self.extent(), 0.0);
    }

    fn read_fields(input: &dyn FieldReader) -> Self {
        Self::new(
            read_vec3(input, "origin", Vec3::ZERO),
            read_vec3(input, "direction", Vec3::ZERO),
            input.read("extent", 0.0),
        )
    }
}

impl Persist for Triangle {
    fn write_fields(&self, out: &mut dyn FieldWriter) {
        write_vec3(out, "v0", self.vertices[0], Vec3::ZERO);
        write_vec3(out, "v1", self.vertices[1], Vec3::ZERO);
        write_vec3(out, "v2", self.vertices[2], Vec3::ZERO);
    }

    fn read_fields(input: &dyn FieldReader) -> Self {
        Self::new(
            read_vec3(input, "v0", Vec3::ZERO),
            read_vec3(input, "v1", Vec3::ZERO),
            read_vec3(input, "v2", Vec3::ZERO),
        )
    }
}

impl Persist for Rectangle {
    fn write_fields(&self, out: &mut dyn FieldWriter) {
        write_vec3(out, "a", self.a, Vec3::ZERO);
        write_vec3(out, "b", self.b, Vec3::ZERO);
        write_vec3(out, "c", self.c, Vec3::ZERO);
    }

    fn read_fields(input: &dyn FieldReader) -> Self {
        Self::new(
            read_vec3(input, "a", Vec3::ZERO),
            read_vec3(input, "b", Vec3::ZERO),
            read_vec3(input, "c", Vec3::ZERO),
        )
    }
}

impl Persist for TransformMatrixQuat {
    fn write_fields(&self, out: &mut dyn FieldWriter) {
        out.write("rot.x", self.rotation.x, 0.0);
        out.write("rot.y", self.rotation.y, 0.0);
        out.write("rot.z", self.rotation.z, 0.0);
        out.write("rot.w", self.rotation.w, 1.0);
        write_vec3(out, "translation", self.translation, Vec3::ZERO);
        write_vec3(out, "scale", self.scale, Vec3::ONE);
    }

    fn read_fields(input: &dyn FieldReader) -> Self {
        Self::new(
            Quat::new(
                input.read("rot.x", 0.0),
                input.read("rot.y", 0.0),
                input.read("rot.z", 0.0),
                input.read("rot.w", 1.0),
            ),
            read_vec3(input, "translation", Vec3::ZERO),
            read_vec3(input, "scale", Vec3::ONE),
        )
    }
}
