//! Built-in Cornell box scene.
//!
//! Geometry follows the measured Cornell box data (millimetres): a
//! 556 x 548.8 x 559.2 room with a red left wall, a green right wall, two
//! white blocks and a rectangular ceiling light.

use glint_renderer::{
    Color, DiffuseLight, Lambertian, Material, Object, Scene, SceneError, Triangle, Vec3,
};
use std::sync::Arc;

/// Height of the emissive panel, just under the ceiling.
pub const LIGHT_Y: f32 = 548.7;

const CEILING_Y: f32 = 548.8;

pub fn red() -> Lambertian {
    Lambertian::new(Color::new(0.63, 0.065, 0.05))
}

pub fn green() -> Lambertian {
    Lambertian::new(Color::new(0.14, 0.45, 0.091))
}

pub fn white() -> Lambertian {
    Lambertian::new(Color::new(0.725, 0.71, 0.68))
}

/// Warm white emission built from three spectral peaks.
pub fn light() -> DiffuseLight {
    let peak1 = Color::new(0.747 + 0.058, 0.747 + 0.258, 0.747);
    let peak2 = Color::new(0.740 + 0.287, 0.740 + 0.160, 0.740);
    let peak3 = Color::new(0.737 + 0.642, 0.737 + 0.159, 0.737);
    DiffuseLight::new(8.0 * peak1 + 15.6 * peak2 + 18.4 * peak3)
}

/// Planar quad `a b c d` as two triangles sharing the `a c` diagonal.
fn push_rect<M: Material + Clone + 'static>(
    objects: &mut Vec<Arc<dyn Object>>,
    corners: [[f32; 3]; 4],
    material: &M,
) {
    let [a, b, c, d] = corners.map(Vec3::from_array);
    objects.push(Arc::new(Triangle::new(a, b, c, material.clone())));
    objects.push(Arc::new(Triangle::new(a, c, d, material.clone())));
}

/// Top face and four sides of a block standing on the floor.
fn push_block(objects: &mut Vec<Arc<dyn Object>>, footprint: [[f32; 2]; 4], height: f32) {
    let white = white();
    let top = footprint.map(|[x, z]| [x, height, z]);
    push_rect(objects, top, &white);

    for i in 0..4 {
        let [x0, z0] = footprint[i];
        let [x1, z1] = footprint[(i + 1) % 4];
        push_rect(
            objects,
            [[x0, 0.0, z0], [x0, height, z0], [x1, height, z1], [x1, 0.0, z1]],
            &white,
        );
    }
}

/// All triangles of the Cornell box.
pub fn objects() -> Vec<Arc<dyn Object>> {
    let mut objects: Vec<Arc<dyn Object>> = Vec::new();
    let (red, green, white) = (red(), green(), white());

    // Floor
    push_rect(
        &mut objects,
        [[552.8, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 0.0, 559.2], [549.6, 0.0, 559.2]],
        &white,
    );
    // Ceiling
    push_rect(
        &mut objects,
        [
            [556.0, CEILING_Y, 0.0],
            [556.0, CEILING_Y, 559.2],
            [0.0, CEILING_Y, 559.2],
            [0.0, CEILING_Y, 0.0],
        ],
        &white,
    );
    // Back wall
    push_rect(
        &mut objects,
        [
            [549.6, 0.0, 559.2],
            [0.0, 0.0, 559.2],
            [0.0, CEILING_Y, 559.2],
            [556.0, CEILING_Y, 559.2],
        ],
        &white,
    );
    // Right wall
    push_rect(
        &mut objects,
        [
            [0.0, 0.0, 559.2],
            [0.0, 0.0, 0.0],
            [0.0, CEILING_Y, 0.0],
            [0.0, CEILING_Y, 559.2],
        ],
        &green,
    );
    // Left wall
    push_rect(
        &mut objects,
        [
            [552.8, 0.0, 0.0],
            [549.6, 0.0, 559.2],
            [556.0, CEILING_Y, 559.2],
            [556.0, CEILING_Y, 0.0],
        ],
        &red,
    );

    push_block(
        &mut objects,
        [[130.0, 65.0], [82.0, 225.0], [240.0, 272.0], [290.0, 114.0]],
        165.0,
    );
    push_block(
        &mut objects,
        [[423.0, 247.0], [265.0, 296.0], [314.0, 456.0], [472.0, 406.0]],
        330.0,
    );

    push_rect(
        &mut objects,
        [
            [343.0, LIGHT_Y, 227.0],
            [343.0, LIGHT_Y, 332.0],
            [213.0, LIGHT_Y, 332.0],
            [213.0, LIGHT_Y, 227.0],
        ],
        &light(),
    );

    objects
}

pub fn scene() -> Result<Scene, SceneError> {
    Scene::new(objects())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_renderer::Ray;

    #[test]
    fn test_cornell_box_builds() {
        let scene = scene().unwrap();

        // 5 walls, 2 blocks of 5 faces, 1 light; 2 triangles each
        assert_eq!(scene.objects().len(), 2 * (5 + 10 + 1));
        assert_eq!(scene.lights().emitter_count(), 2);
        assert!((scene.lights().total_area() - 130.0 * 105.0).abs() < 0.5);
    }

    #[test]
    fn test_light_is_bright_and_warm() {
        let emit = light().emission();
        assert!(emit.x > emit.y && emit.y > emit.z);
        assert!(emit.z > 30.0);
    }

    #[test]
    fn test_rays_from_eye_hit_the_room() {
        let scene = scene().unwrap();
        let eye = Vec3::new(278.0, 273.0, -800.0);

        // Straight up from inside the room, through the light
        let up = scene
            .intersect(&Ray::new(Vec3::new(278.0, 100.0, 280.0), Vec3::Y))
            .unwrap();
        assert!(up.material.has_emission());
        assert!((up.p.y - LIGHT_Y).abs() < 1e-2);

        // Toward the back wall, above the tall block
        let back = scene
            .intersect(&Ray::new(eye, Vec3::new(0.0, 150.0, 1359.2)))
            .unwrap();
        assert!((back.p.z - 559.2).abs() < 1e-1);
        assert!(!back.material.has_emission());
    }
}
