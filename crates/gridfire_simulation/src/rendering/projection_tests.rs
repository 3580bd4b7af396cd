//! Tests for Projector.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use std::f32::consts::{FRAC_PI_2, PI, TAU};

    use crate::components::{ImageRef, Observer};
    use crate::rendering::projection::*;
    use crate::settings::Viewport;

    const IMAGE: ImageRef = ImageRef::Texture(7);

    fn projector(wrap: AngleWrap) -> Projector {
        Projector::new(Viewport::default(), wrap)
    }

    #[test]
    fn test_entity_straight_ahead_is_centered() {
        let viewport = Viewport::default();
        let observer = Observer::new(Vec2::new(5.0, 5.0), 0.0);

        for wrap in [AngleWrap::Legacy, AngleWrap::Normalized] {
            let entry = projector(wrap)
                .project(&observer, Vec2::new(6.0, 5.0), 0.3, IMAGE)
                .expect("entity in front must be visible");

            assert!((entry.depth - 1.0).abs() < 1e-6);
            assert!((entry.rect.center_x() - viewport.half_width).abs() < 1e-3);
            assert_eq!(entry.rect.width, entry.rect.height);
            // Вплотную размер упирается в cap
            assert_eq!(entry.rect.height, 2.0 * viewport.height);
            assert_eq!(entry.image, IMAGE);
        }
    }

    #[test]
    fn test_projected_rect_is_centered_on_horizon() {
        let viewport = Viewport::default();
        let observer = Observer::new(Vec2::new(2.0, 2.0), 0.0);
        let entry = projector(AngleWrap::Normalized)
            .project(&observer, Vec2::new(52.0, 2.0), 0.3, IMAGE)
            .unwrap();

        // dist 50 → размер ниже cap-а 2 × HEIGHT
        let expected = viewport.screen_dist / 50.0 * 0.3 * viewport.sprite_scale;
        assert!(expected < 2.0 * viewport.height);
        assert!((entry.rect.height - expected).abs() < 1e-2);
        assert!((entry.rect.y + entry.rect.height / 2.0 - viewport.half_height).abs() < 1e-3);
    }

    #[test]
    fn test_entities_behind_field_of_view_are_dropped() {
        let viewport = Viewport::default();
        let limit = viewport.half_fov + viewport.margin_columns * viewport.delta_angle;

        for wrap in [AngleWrap::Legacy, AngleWrap::Normalized] {
            let projector = projector(wrap);
            for heading_step in 0..16 {
                let heading = heading_step as f32 * TAU / 16.0;
                let observer = Observer::new(Vec2::new(50.0, 50.0), heading);

                let mut offset = limit + 0.05;
                while offset < TAU - limit - 0.05 {
                    let direction = heading + offset;
                    let pos = observer.position + Vec2::new(direction.cos(), direction.sin()) * 3.0;
                    assert!(
                        projector.project(&observer, pos, 0.3, IMAGE).is_none(),
                        "{wrap:?}: heading {heading}, offset {offset} must be culled"
                    );
                    offset += 0.1;
                }
            }
        }
    }

    #[test]
    fn test_too_close_is_dropped() {
        let projector = projector(AngleWrap::Normalized);
        let observer = Observer::new(Vec2::new(5.0, 5.0), 0.0);

        assert!(projector.project(&observer, Vec2::new(5.0, 5.0), 0.3, IMAGE).is_none());
        assert!(projector.project(&observer, Vec2::new(5.4, 5.0), 0.3, IMAGE).is_none());
        assert!(projector.project(&observer, Vec2::new(5.5, 5.0), 0.3, IMAGE).is_none());
        assert!(projector.project(&observer, Vec2::new(5.6, 5.0), 0.3, IMAGE).is_some());
    }

    #[test]
    fn test_size_non_increasing_with_distance() {
        let projector = projector(AngleWrap::Normalized);
        let observer = Observer::new(Vec2::new(1.0, 1.0), 0.3);
        let direction = Vec2::new(0.3f32.cos(), 0.3f32.sin());

        let mut previous = f32::INFINITY;
        let mut distance = 0.6;
        while distance < 40.0 {
            let entry = projector
                .project(&observer, observer.position + direction * distance, 0.5, IMAGE)
                .unwrap();
            assert!(entry.rect.height <= previous);
            previous = entry.rect.height;
            distance += 0.25;
        }
    }

    #[test]
    fn test_partially_offscreen_margin_is_kept() {
        let viewport = Viewport::default();
        let projector = projector(AngleWrap::Normalized);

        assert!(projector.is_column_visible(-viewport.margin_columns));
        assert!(projector.is_column_visible(viewport.num_rays + viewport.margin_columns));
        assert!(!projector.is_column_visible(-viewport.margin_columns - 0.5));
        assert!(!projector.is_column_visible(viewport.num_rays + viewport.margin_columns + 0.5));
    }

    #[test]
    fn test_seam_heuristic_differs_from_normalized() {
        // Смотрим строго "вверх" (3π/2), entity прямо по курсу: dx == 0, dy < 0.
        // Эвристика не срабатывает (dx не > 0 и не < 0) → delta = −2π → off-screen.
        let observer = Observer::new(Vec2::new(5.0, 5.0), 3.0 * FRAC_PI_2);
        let target = Vec2::new(5.0, 2.0);

        let normalized = projector(AngleWrap::Normalized).project(&observer, target, 0.3, IMAGE);
        let entry = normalized.expect("normalized wrap keeps the entity");
        assert!((entry.rect.center_x() - Viewport::default().half_width).abs() < 1e-2);

        assert!(projector(AngleWrap::Legacy).project(&observer, target, 0.3, IMAGE).is_none());
    }

    #[test]
    fn test_legacy_heuristic_handles_common_seam_cases() {
        // heading > π, entity справа через шов (dx > 0)
        let delta = angular_offset(1.0, 0.05, 6.2, AngleWrap::Legacy);
        assert!((delta - (0.05f32.atan2(1.0) - 6.2 + TAU)).abs() < 1e-5);
        assert!(delta.abs() < 0.2);

        // dx < 0 && dy < 0
        let delta = angular_offset(-1.0, -0.06, 3.1, AngleWrap::Legacy);
        assert!(delta.abs() < 0.2);
    }

    #[test]
    fn test_normalize_delta_range() {
        let mut delta = -20.0;
        while delta < 20.0 {
            let n = normalize_delta(delta);
            assert!(n > -PI - 1e-5 && n <= PI + 1e-5, "{delta} → {n}");
            // Та же точка на окружности
            assert!(((n - delta) / TAU - ((n - delta) / TAU).round()).abs() < 1e-4);
            delta += 0.37;
        }
        assert!((normalize_delta(-PI) - PI).abs() < 1e-6);
    }
}
