//! Integration tests for flexmask-math.

use flexmask_math::{CameraMatrices, Mat4, Vec2, Vec3, Vec4};

fn camera() -> CameraMatrices {
    let projection = Mat4::perspective_rh_gl(60f32.to_radians(), 1.0, 0.1, 100.0);
    let model_view = Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0));
    CameraMatrices::new(model_view, projection)
}

// ─── Projection Tests ─────────────────────────────────────────

#[test]
fn origin_projects_to_viewport_center() {
    let p = camera().project(Vec3::ZERO);
    assert!(p.viewport.length() < 1e-6);
    assert!((p.view.z + 5.0).abs() < 1e-6);
    assert!((p.clip.w - 5.0).abs() < 1e-5);
}

#[test]
fn offset_point_projects_off_center() {
    let p = camera().project(Vec3::new(1.0, 0.0, 0.0));
    assert!(p.viewport.x > 0.0);
    assert!(p.viewport.y.abs() < 1e-6);
}

#[test]
fn zero_w_does_not_divide() {
    let cam = CameraMatrices::new(Mat4::IDENTITY, Mat4::ZERO);
    let p = cam.project(Vec3::new(1.0, 2.0, 3.0));
    assert!(p.viewport.x.is_finite());
    assert!(p.viewport.y.is_finite());
}

// ─── Unprojection Tests ───────────────────────────────────────

#[test]
fn zero_residual_unprojects_to_zero() {
    let cam = camera();
    let p = cam.project(Vec3::new(0.3, -0.2, 0.1));
    let d = cam.unproject_residual(Vec2::ZERO, p.clip, 2.0);
    assert_eq!(d, Vec4::ZERO);
}

#[test]
fn unprojected_residual_lies_in_view_plane() {
    let cam = camera();
    let p = cam.project(Vec3::ZERO);
    let d = cam.unproject_residual(Vec2::new(0.1, -0.05), p.clip, 2.0);
    assert!(d.x > 0.0);
    assert!(d.y < 0.0);
    assert_eq!(d.z, 0.0);
    assert_eq!(d.w, 0.0);
}

#[test]
fn unprojection_scales_linearly_with_gain() {
    let cam = camera();
    let p = cam.project(Vec3::ZERO);
    let r = Vec2::new(0.1, 0.1);
    let one = cam.unproject_residual(r, p.clip, 1.0);
    let two = cam.unproject_residual(r, p.clip, 2.0);
    assert!((two.x - 2.0 * one.x).abs() < 1e-6);
    assert!((two.y - 2.0 * one.y).abs() < 1e-6);
}

#[test]
fn degenerate_projection_diagonal_gives_zero() {
    let cam = CameraMatrices::new(Mat4::IDENTITY, Mat4::ZERO);
    let d = cam.unproject_residual(Vec2::new(1.0, 1.0), Vec4::new(0.0, 0.0, 3.0, 1.0), 2.0);
    assert_eq!(d, Vec4::ZERO);
}

// ─── View → Object Tests ──────────────────────────────────────

#[test]
fn translation_does_not_affect_directions() {
    let cam = camera();
    let obj = cam.view_to_object(Vec4::new(1.0, 2.0, 0.0, 0.0)).unwrap();
    assert!((obj - Vec3::new(1.0, 2.0, 0.0)).length() < 1e-6);
}

#[test]
fn rotation_is_undone() {
    let model_view = Mat4::from_rotation_z(std::f32::consts::FRAC_PI_2);
    let cam = CameraMatrices::new(model_view, Mat4::IDENTITY);
    let obj = cam.view_to_object(Vec4::new(0.0, 1.0, 0.0, 0.0)).unwrap();
    assert!((obj - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-5);
}

#[test]
fn singular_model_view_is_rejected() {
    let cam = CameraMatrices::new(Mat4::ZERO, Mat4::IDENTITY);
    assert!(cam.view_to_object(Vec4::X).is_none());
}

#[test]
fn small_uniform_scale_is_invertible() {
    let model_view = Mat4::from_scale(Vec3::splat(0.001));
    let cam = CameraMatrices::new(model_view, Mat4::IDENTITY);
    let obj = cam.view_to_object(Vec4::new(0.001, 0.0, 0.0, 0.0)).unwrap();
    assert!((obj - Vec3::X).length() < 1e-4);
}
