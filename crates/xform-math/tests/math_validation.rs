// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Fixture-driven validation of the transform primitives.
//!
//! Pins scalar, vector, matrix, quaternion, and PRNG results to the values in
//! `fixtures/math-fixtures.json` so layout or convention regressions show up
//! as a named fixture failure.
#![allow(missing_docs)]

use once_cell::sync::Lazy;
use serde::Deserialize;

use xform_math::{self as math, Mat4, Prng, Quat, Vec3};

static RAW_FIXTURES: &str = include_str!("fixtures/math-fixtures.json");

static FIXTURES: Lazy<MathFixtures> = Lazy::new(|| {
    let fixtures: MathFixtures =
        serde_json::from_str(RAW_FIXTURES).expect("failed to parse math fixtures");
    fixtures.validate();
    fixtures
});

#[derive(Debug, Deserialize)]
struct MathFixtures {
    #[serde(default)]
    tolerance: Tolerance,
    scalars: ScalarFixtures,
    vec3: Vec3Fixtures,
    mat4: Mat4Fixtures,
    quat: QuatFixtures,
    prng: Vec<PrngFixture>,
}

impl MathFixtures {
    fn validate(&self) {
        fn ensure<T>(name: &str, slice: &[T]) {
            assert!(!slice.is_empty(), "math fixtures set '{name}' must not be empty");
        }

        ensure("scalars.clamp", &self.scalars.clamp);
        ensure("scalars.deg_to_rad", &self.scalars.deg_to_rad);
        ensure("scalars.rad_to_deg", &self.scalars.rad_to_deg);
        ensure("vec3.add", &self.vec3.add);
        ensure("vec3.div", &self.vec3.div);
        ensure("vec3.dot", &self.vec3.dot);
        ensure("vec3.cross", &self.vec3.cross);
        ensure("vec3.length", &self.vec3.length);
        ensure("vec3.normalize", &self.vec3.normalize);
        ensure("mat4.multiply", &self.mat4.multiply);
        ensure("mat4.transform_point", &self.mat4.transform_point);
        ensure("mat4.transform_direction", &self.mat4.transform_direction);
        ensure("mat4.inverse", &self.mat4.inverse);
        ensure("mat4.perspective", &self.mat4.perspective);
        ensure("mat4.orthographic", &self.mat4.orthographic);
        ensure("quat.from_axis_angle", &self.quat.from_axis_angle);
        ensure("quat.from_euler", &self.quat.from_euler);
        ensure("quat.multiply", &self.quat.multiply);
        ensure("quat.normalize", &self.quat.normalize);
        ensure("quat.slerp", &self.quat.slerp);
        ensure("quat.to_mat4", &self.quat.to_mat4);
        ensure("prng", &self.prng);
    }
}

#[derive(Debug, Clone, Deserialize)]
struct Tolerance {
    #[serde(default = "Tolerance::default_absolute")]
    absolute: f32,
    #[serde(default = "Tolerance::default_relative")]
    relative: f32,
}

impl Tolerance {
    const fn default_absolute() -> f32 {
        1e-6
    }

    const fn default_relative() -> f32 {
        1e-6
    }

    fn allowed_error(&self, reference: f32) -> f32 {
        self.absolute.max(self.relative * reference.abs())
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            absolute: Self::default_absolute(),
            relative: Self::default_relative(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ScalarFixtures {
    clamp: Vec<ClampFixture>,
    deg_to_rad: Vec<UnaryFixture>,
    rad_to_deg: Vec<UnaryFixture>,
}

#[derive(Debug, Deserialize)]
struct ClampFixture {
    value: f32,
    min: f32,
    max: f32,
    expected: f32,
}

#[derive(Debug, Deserialize)]
struct UnaryFixture {
    value: f32,
    expected: f32,
}

#[derive(Debug, Deserialize)]
struct Vec3Fixtures {
    add: Vec<Vec3BinaryFixture>,
    div: Vec<Vec3BinaryFixture>,
    dot: Vec<Vec3DotFixture>,
    cross: Vec<Vec3BinaryFixture>,
    length: Vec<Vec3LengthFixture>,
    normalize: Vec<Vec3UnaryFixture>,
}

#[derive(Debug, Deserialize)]
struct Vec3BinaryFixture {
    a: [f32; 3],
    b: [f32; 3],
    expected: [f32; 3],
}

#[derive(Debug, Deserialize)]
struct Vec3DotFixture {
    a: [f32; 3],
    b: [f32; 3],
    expected: f32,
}

#[derive(Debug, Deserialize)]
struct Vec3LengthFixture {
    value: [f32; 3],
    expected: f32,
}

#[derive(Debug, Deserialize)]
struct Vec3UnaryFixture {
    value: [f32; 3],
    expected: [f32; 3],
}

#[derive(Debug, Deserialize)]
struct Mat4Fixtures {
    multiply: Vec<Mat4BinaryFixture>,
    transform_point: Vec<Mat4Vec3Fixture>,
    transform_direction: Vec<Mat4Vec3Fixture>,
    inverse: Vec<Mat4UnaryFixture>,
    perspective: Vec<PerspectiveFixture>,
    orthographic: Vec<OrthographicFixture>,
}

#[derive(Debug, Deserialize)]
struct Mat4BinaryFixture {
    a: [f32; 16],
    b: [f32; 16],
    expected: [f32; 16],
}

#[derive(Debug, Deserialize)]
struct Mat4UnaryFixture {
    value: [f32; 16],
    expected: [f32; 16],
}

#[derive(Debug, Deserialize)]
struct Mat4Vec3Fixture {
    matrix: [f32; 16],
    vector: [f32; 3],
    expected: [f32; 3],
}

#[derive(Debug, Deserialize)]
struct PerspectiveFixture {
    fov_deg: f32,
    aspect: f32,
    near: f32,
    far: f32,
    expected: [f32; 16],
}

#[derive(Debug, Deserialize)]
struct OrthographicFixture {
    /// `[left, right, bottom, top, near, far]`
    bounds: [f32; 6],
    expected: [f32; 16],
}

#[derive(Debug, Deserialize)]
struct QuatFixtures {
    from_axis_angle: Vec<QuatAxisAngleFixture>,
    from_euler: Vec<QuatEulerFixture>,
    multiply: Vec<QuatBinaryFixture>,
    normalize: Vec<QuatUnaryFixture>,
    slerp: Vec<QuatSlerpFixture>,
    to_mat4: Vec<QuatMat4Fixture>,
}

#[derive(Debug, Deserialize)]
struct QuatAxisAngleFixture {
    axis: [f32; 3],
    angle: f32,
    expected: [f32; 4],
}

#[derive(Debug, Deserialize)]
struct QuatEulerFixture {
    degrees: [f32; 3],
    expected: [f32; 4],
}

#[derive(Debug, Deserialize)]
struct QuatBinaryFixture {
    a: [f32; 4],
    b: [f32; 4],
    expected: [f32; 4],
}

#[derive(Debug, Deserialize)]
struct QuatUnaryFixture {
    value: [f32; 4],
    expected: [f32; 4],
}

#[derive(Debug, Deserialize)]
struct QuatSlerpFixture {
    a: [f32; 4],
    b: [f32; 4],
    t: f32,
    expected: [f32; 4],
}

#[derive(Debug, Deserialize)]
struct QuatMat4Fixture {
    value: [f32; 4],
    expected: [f32; 16],
}

#[derive(Debug, Deserialize)]
struct PrngFixture {
    seed: [u64; 2],
    expected_next: Vec<f32>,
    #[serde(default)]
    expected_ints: Option<PrngIntFixture>,
}

#[derive(Debug, Deserialize)]
struct PrngIntFixture {
    min: i32,
    max: i32,
    values: Vec<i32>,
}

fn assert_scalar(actual: f32, expected: f32, tol: &Tolerance, ctx: &str) {
    let diff = (actual - expected).abs();
    let allowed = tol.allowed_error(expected);
    assert!(
        diff <= allowed,
        "{ctx}: expected {expected}, got {actual} (diff {diff} > {allowed})"
    );
}

fn assert_slice(actual: &[f32], expected: &[f32], tol: &Tolerance, ctx: &str) {
    assert_eq!(actual.len(), expected.len(), "{ctx}: length mismatch");
    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert_scalar(*a, *e, tol, &format!("{ctx}[{i}]"));
    }
}

#[test]
fn scalar_fixtures_all_match() {
    let tol = &FIXTURES.tolerance;
    for fix in &FIXTURES.scalars.clamp {
        let actual = math::clamp(fix.value, fix.min, fix.max);
        assert_scalar(
            actual,
            fix.expected,
            tol,
            &format!("scalars.clamp value={} range=[{}, {}]", fix.value, fix.min, fix.max),
        );
    }

    for fix in &FIXTURES.scalars.deg_to_rad {
        let actual = math::deg_to_rad(fix.value);
        assert_scalar(actual, fix.expected, tol, &format!("scalars.deg_to_rad value={}", fix.value));
    }

    for fix in &FIXTURES.scalars.rad_to_deg {
        let actual = math::rad_to_deg(fix.value);
        assert_scalar(actual, fix.expected, tol, &format!("scalars.rad_to_deg value={}", fix.value));
    }
}

#[test]
fn vec3_fixtures_cover_operations() {
    let tol = &FIXTURES.tolerance;
    for fix in &FIXTURES.vec3.add {
        let actual = Vec3::from(fix.a).add(&Vec3::from(fix.b));
        assert_slice(
            &actual.to_array(),
            &fix.expected,
            tol,
            &format!("vec3.add a={:?} b={:?}", fix.a, fix.b),
        );
    }

    for fix in &FIXTURES.vec3.div {
        let actual = Vec3::div(&Vec3::from(fix.a), &Vec3::from(fix.b));
        assert_slice(
            &actual.to_array(),
            &fix.expected,
            tol,
            &format!("vec3.div a={:?} b={:?}", fix.a, fix.b),
        );
    }

    for fix in &FIXTURES.vec3.dot {
        let actual = Vec3::from(fix.a).dot(&Vec3::from(fix.b));
        assert_scalar(actual, fix.expected, tol, &format!("vec3.dot a={:?} b={:?}", fix.a, fix.b));
    }

    for fix in &FIXTURES.vec3.cross {
        let actual = Vec3::from(fix.a).cross(&Vec3::from(fix.b));
        assert_slice(
            &actual.to_array(),
            &fix.expected,
            tol,
            &format!("vec3.cross a={:?} b={:?}", fix.a, fix.b),
        );
    }

    for (idx, fix) in FIXTURES.vec3.length.iter().enumerate() {
        let actual = Vec3::from(fix.value).length();
        assert_scalar(
            actual,
            fix.expected,
            tol,
            &format!("vec3.length#[{idx}] value={:?}", fix.value),
        );
    }

    for (idx, fix) in FIXTURES.vec3.normalize.iter().enumerate() {
        let actual = Vec3::from(fix.value).normalize();
        assert_slice(
            &actual.to_array(),
            &fix.expected,
            tol,
            &format!("vec3.normalize#[{idx}] value={:?}", fix.value),
        );
    }
}

#[test]
fn mat4_fixtures_validate_transformations() {
    let tol = &FIXTURES.tolerance;
    for (i, fix) in FIXTURES.mat4.multiply.iter().enumerate() {
        let actual = Mat4::from(fix.a).multiply(&Mat4::from(fix.b));
        assert_slice(&actual.to_array(), &fix.expected, tol, &format!("mat4.multiply[{i}]"));
    }

    for fix in &FIXTURES.mat4.transform_point {
        let matrix = Mat4::from(fix.matrix);
        // Fixture vectors are points (homogeneous w = 1).
        let actual = matrix.multiply_vec3(&Vec3::from(fix.vector));
        assert_slice(
            &actual.to_array(),
            &fix.expected,
            tol,
            &format!("mat4.transform_point vector={:?}", fix.vector),
        );
    }

    for fix in &FIXTURES.mat4.transform_direction {
        let matrix = Mat4::from(fix.matrix);
        let actual = matrix.transform_direction(&Vec3::from(fix.vector));
        assert_slice(
            &actual.to_array(),
            &fix.expected,
            tol,
            &format!("mat4.transform_direction vector={:?}", fix.vector),
        );
    }

    for (i, fix) in FIXTURES.mat4.inverse.iter().enumerate() {
        let actual = Mat4::from(fix.value)
            .try_inverse()
            .unwrap_or_else(|err| panic!("mat4.inverse[{i}] unexpectedly failed: {err}"));
        assert_slice(&actual.to_array(), &fix.expected, tol, &format!("mat4.inverse[{i}]"));
    }
}

#[test]
fn projection_fixtures_match() {
    let tol = &FIXTURES.tolerance;
    for fix in &FIXTURES.mat4.perspective {
        let actual = Mat4::perspective(fix.fov_deg, fix.aspect, fix.near, fix.far);
        assert_slice(
            &actual.to_array(),
            &fix.expected,
            tol,
            &format!(
                "mat4.perspective fov={} aspect={} near={} far={}",
                fix.fov_deg, fix.aspect, fix.near, fix.far
            ),
        );
    }

    for fix in &FIXTURES.mat4.orthographic {
        let [l, r, b, t, n, f] = fix.bounds;
        let actual = Mat4::orthographic(l, r, b, t, n, f);
        assert_slice(
            &actual.to_array(),
            &fix.expected,
            tol,
            &format!("mat4.orthographic bounds={:?}", fix.bounds),
        );
    }
}

#[test]
fn quat_fixtures_validate_operations() {
    let tol = &FIXTURES.tolerance;
    for fix in &FIXTURES.quat.from_axis_angle {
        let actual = Quat::from_axis_angle(Vec3::from(fix.axis), fix.angle);
        assert_slice(
            &actual.to_array(),
            &fix.expected,
            tol,
            &format!("quat.from_axis_angle axis={:?} angle={}", fix.axis, fix.angle),
        );
    }

    for fix in &FIXTURES.quat.from_euler {
        let actual = Quat::from_euler_angles(Vec3::from(fix.degrees));
        assert_slice(
            &actual.to_array(),
            &fix.expected,
            tol,
            &format!("quat.from_euler degrees={:?}", fix.degrees),
        );
    }

    for fix in &FIXTURES.quat.multiply {
        let actual = Quat::from(fix.a).multiply(&Quat::from(fix.b));
        assert_slice(
            &actual.to_array(),
            &fix.expected,
            tol,
            &format!("quat.multiply a={:?} b={:?}", fix.a, fix.b),
        );
    }

    for fix in &FIXTURES.quat.normalize {
        let actual = Quat::from(fix.value).normalize();
        assert_slice(
            &actual.to_array(),
            &fix.expected,
            tol,
            &format!("quat.normalize value={:?}", fix.value),
        );
    }

    for fix in &FIXTURES.quat.slerp {
        let actual = Quat::slerp(&Quat::from(fix.a), &Quat::from(fix.b), fix.t);
        assert_slice(
            &actual.to_array(),
            &fix.expected,
            tol,
            &format!("quat.slerp a={:?} b={:?} t={}", fix.a, fix.b, fix.t),
        );
    }

    for fix in &FIXTURES.quat.to_mat4 {
        let actual = Quat::from(fix.value).to_mat4();
        assert_slice(
            &actual.to_array(),
            &fix.expected,
            tol,
            &format!("quat.to_mat4 value={:?}", fix.value),
        );
    }
}

#[test]
fn prng_fixture_replays_sequence() {
    let tol = &FIXTURES.tolerance;
    for fix in &FIXTURES.prng {
        let mut prng = Prng::from_seed(fix.seed[0], fix.seed[1]);
        for (i, expected) in fix.expected_next.iter().enumerate() {
            let actual = prng.next_f32();
            assert_scalar(
                actual,
                *expected,
                tol,
                &format!("prng.expected_next seed={:?} index={i}", fix.seed),
            );
        }

        if let Some(int_fixture) = &fix.expected_ints {
            let mut prng = Prng::from_seed(fix.seed[0], fix.seed[1]);
            let actual: Vec<i32> = int_fixture
                .values
                .iter()
                .map(|_| {
                    prng.next_int(int_fixture.min, int_fixture.max)
                        .expect("fixture ranges are well-formed")
                })
                .collect();
            assert_eq!(
                actual, int_fixture.values,
                "prng.expected_ints seed={:?}",
                fix.seed
            );
        }
    }
}
