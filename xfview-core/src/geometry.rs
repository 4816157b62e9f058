/// Primitive meshes the visualizer can display
use std::f64::consts::{PI, TAU};
use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use nalgebra::{Point3, Vector3};

const SPHERE_SEGMENTS: usize = 24;
const SPHERE_RINGS: usize = 12;
const RADIAL_SEGMENTS: usize = 24;

/// Shape selector of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeometryKind {
    Sphere,
    #[default]
    Cube,
    Cone,
    Cylinder,
    Pyramid,
}

impl GeometryKind {
    pub const ALL: [GeometryKind; 5] = [
        GeometryKind::Cube,
        GeometryKind::Sphere,
        GeometryKind::Cone,
        GeometryKind::Cylinder,
        GeometryKind::Pyramid,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GeometryKind::Sphere => "sphere",
            GeometryKind::Cube => "cube",
            GeometryKind::Cone => "cone",
            GeometryKind::Cylinder => "cylinder",
            GeometryKind::Pyramid => "pyramid",
        }
    }

    /// Next kind in selector order, wrapping around
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|&kind| kind == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GeometryKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        match Self::ALL.iter().find(|kind| kind.name() == name) {
            Some(&kind) => Ok(kind),
            None => bail!("unknown geometry `{name}` (expected one of sphere, cube, cone, cylinder, pyramid)"),
        }
    }
}

/// A 3D vertex with position and normal
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Point3<f64>,
    pub normal: Vector3<f64>,
}

impl Vertex {
    pub fn new(x: f64, y: f64, z: f64, nx: f64, ny: f64, nz: f64) -> Self {
        Self {
            position: Point3::new(x, y, z),
            normal: Vector3::new(nx, ny, nz),
        }
    }

    fn from_parts(position: Point3<f64>, normal: Vector3<f64>) -> Self {
        Self { position, normal }
    }
}

/// A triangle face defined by three vertices
#[derive(Debug, Clone)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Calculate the face normal from the triangle's vertices
    pub fn calculate_normal(&self) -> Vector3<f64> {
        let v0 = self.vertices[0].position;
        let v1 = self.vertices[1].position;
        let v2 = self.vertices[2].position;

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        edge1.cross(&edge2).normalize()
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Unit-sized mesh for a selector entry
    pub fn from_kind(kind: GeometryKind) -> Self {
        match kind {
            GeometryKind::Sphere => Self::sphere(1.0, SPHERE_SEGMENTS, SPHERE_RINGS),
            GeometryKind::Cube => Self::cube(1.0),
            GeometryKind::Cone => Self::cone(1.0, 1.0, RADIAL_SEGMENTS),
            GeometryKind::Cylinder => Self::cylinder(1.0, 1.0, RADIAL_SEGMENTS),
            GeometryKind::Pyramid => Self::tetrahedron(1.0),
        }
    }

    /// Axis-aligned cube centred on the origin
    pub fn cube(size: f64) -> Self {
        let half = size / 2.0;
        let mut mesh = Self::with_capacity(12);

        // (normal, u, v) with u x v == normal so windings face outward
        let faces = [
            (Vector3::x(), Vector3::y(), Vector3::z()),
            (-Vector3::x(), Vector3::z(), Vector3::y()),
            (Vector3::y(), Vector3::z(), Vector3::x()),
            (-Vector3::y(), Vector3::x(), Vector3::z()),
            (Vector3::z(), Vector3::x(), Vector3::y()),
            (-Vector3::z(), Vector3::y(), Vector3::x()),
        ];

        for (normal, u, v) in faces {
            let centre = normal * half;
            let corner = |su: f64, sv: f64| {
                Vertex::from_parts(Point3::from(centre + u * (su * half) + v * (sv * half)), normal)
            };

            mesh.add_triangle(Triangle::new(corner(-1.0, -1.0), corner(1.0, -1.0), corner(1.0, 1.0)));
            mesh.add_triangle(Triangle::new(corner(-1.0, -1.0), corner(1.0, 1.0), corner(-1.0, 1.0)));
        }

        mesh
    }

    /// UV sphere centred on the origin
    pub fn sphere(radius: f64, segments: usize, rings: usize) -> Self {
        let segments = segments.max(3);
        let rings = rings.max(2);
        let mut mesh = Self::with_capacity(segments * rings * 2);

        let point = |ring: usize, segment: usize| {
            let theta = PI * ring as f64 / rings as f64;
            let phi = TAU * segment as f64 / segments as f64;
            let normal = Vector3::new(theta.sin() * phi.cos(), theta.cos(), -theta.sin() * phi.sin());
            Vertex::from_parts(Point3::from(normal * radius), normal)
        };

        for ring in 0..rings {
            for segment in 0..segments {
                let a = point(ring, segment);
                let b = point(ring + 1, segment);
                let c = point(ring + 1, segment + 1);
                let d = point(ring, segment + 1);

                if ring != 0 {
                    mesh.add_triangle(Triangle::new(a, b, d));
                }
                if ring != rings - 1 {
                    mesh.add_triangle(Triangle::new(b, c, d));
                }
            }
        }

        mesh
    }

    /// Cone with its apex on +Y, centred on the origin
    pub fn cone(radius: f64, height: f64, segments: usize) -> Self {
        Self::frustum(0.0, radius, height, segments)
    }

    /// Capped cylinder along Y, centred on the origin
    pub fn cylinder(radius: f64, height: f64, segments: usize) -> Self {
        Self::frustum(radius, radius, height, segments)
    }

    /// Capped truncated cone along Y; a zero top radius gives a cone
    pub fn frustum(radius_top: f64, radius_bottom: f64, height: f64, segments: usize) -> Self {
        let segments = segments.max(3);
        let half = height / 2.0;
        let mut mesh = Self::with_capacity(segments * 4);

        let slope = (radius_bottom - radius_top) / height;
        let rim = |segment: usize, radius: f64, y: f64| {
            let phi = TAU * segment as f64 / segments as f64;
            let (sin, cos) = phi.sin_cos();
            let side_normal = Vector3::new(sin, slope, cos).normalize();
            Vertex::from_parts(Point3::new(radius * sin, y, radius * cos), side_normal)
        };

        let top_centre = Vertex::new(0.0, half, 0.0, 0.0, 1.0, 0.0);
        let bottom_centre = Vertex::new(0.0, -half, 0.0, 0.0, -1.0, 0.0);
        let up = |v: Vertex| Vertex::from_parts(v.position, Vector3::y());
        let down = |v: Vertex| Vertex::from_parts(v.position, -Vector3::y());

        for segment in 0..segments {
            let t0 = rim(segment, radius_top, half);
            let t1 = rim(segment + 1, radius_top, half);
            let b0 = rim(segment, radius_bottom, -half);
            let b1 = rim(segment + 1, radius_bottom, -half);

            // A rim of radius zero collapses to a point: skip its side triangle and cap.
            if radius_top > 0.0 {
                mesh.add_triangle(Triangle::new(t0, b0, t1));
                mesh.add_triangle(Triangle::new(top_centre, up(t0), up(t1)));
            }
            if radius_bottom > 0.0 {
                mesh.add_triangle(Triangle::new(b0, b1, t1));
                mesh.add_triangle(Triangle::new(bottom_centre, down(b1), down(b0)));
            }
        }

        mesh
    }

    /// Regular tetrahedron inscribed in a sphere of `radius`
    pub fn tetrahedron(radius: f64) -> Self {
        let scale = radius / 3f64.sqrt();
        let corners = [
            Point3::new(1.0, 1.0, 1.0) * scale,
            Point3::new(-1.0, -1.0, 1.0) * scale,
            Point3::new(-1.0, 1.0, -1.0) * scale,
            Point3::new(1.0, -1.0, -1.0) * scale,
        ];
        let faces = [[2, 1, 0], [0, 3, 2], [1, 3, 0], [2, 3, 1]];

        let mut mesh = Self::with_capacity(faces.len());
        for [a, b, c] in faces {
            let (pa, pb, pc) = (corners[a], corners[b], corners[c]);
            let normal = (pb - pa).cross(&(pc - pa)).normalize();
            mesh.add_triangle(Triangle::new(
                Vertex::from_parts(pa, normal),
                Vertex::from_parts(pb, normal),
                Vertex::from_parts(pc, normal),
            ));
        }

        mesh
    }

    /// Largest distance of any vertex from the origin
    pub fn bounding_radius(&self) -> f64 {
        self.triangles
            .iter()
            .flat_map(|t| t.vertices.iter())
            .map(|v| v.position.coords.norm())
            .fold(0.0, f64::max)
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}
