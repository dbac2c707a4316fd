// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(dead_code)]

/// Absolute-or-relative closeness check shared by the integration tests.
pub fn close(a: f32, b: f32, abs_tol: f32) -> bool {
    let diff = (a - b).abs();
    let scale = a.abs().max(b.abs());
    diff <= abs_tol.max(1e-6 * scale)
}

pub fn assert_close3(a: [f32; 3], b: [f32; 3], abs_tol: f32) {
    for i in 0..3 {
        assert!(
            close(a[i], b[i], abs_tol),
            "index {i}: {a:?} vs {b:?}, tol={abs_tol}"
        );
    }
}

pub fn assert_close4(a: [f32; 4], b: [f32; 4], abs_tol: f32) {
    for i in 0..4 {
        assert!(
            close(a[i], b[i], abs_tol),
            "index {i}: {a:?} vs {b:?}, tol={abs_tol}"
        );
    }
}

pub fn assert_close16(a: [f32; 16], b: [f32; 16], abs_tol: f32) {
    for i in 0..16 {
        assert!(
            close(a[i], b[i], abs_tol),
            "index {i}: {a:?} vs {b:?}, tol={abs_tol}"
        );
    }
}
