//! Collision detection and response for rectangles
//!
//! Everything in the playfield is an axis-aligned box, so detection is a
//! plain overlap test. Response lives in small helpers so the tick can stay
//! readable.

use glam::Vec2;

use super::rect::Rect;

/// Which wall(s) a ball touched this step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallContact {
    pub left: bool,
    pub right: bool,
    pub top: bool,
}

/// Strict overlap test: touching edges do not count
#[inline]
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    !(a.right() <= b.x() || b.right() <= a.x() || a.bottom() <= b.y() || b.bottom() <= a.y())
}

/// Keep a moving box inside the left, right and top walls
///
/// Velocity components are forced to point away from a touched wall and the
/// position is clamped to `[0, width - w]` horizontally and `>= 0`
/// vertically. The bottom is open.
pub fn bounce_off_walls(rect: &mut Rect, vel: &mut Vec2, width: f32) -> WallContact {
    let mut contact = WallContact::default();

    if rect.pos.x <= 0.0 {
        rect.pos.x = 0.0;
        vel.x = vel.x.abs();
        contact.left = true;
    } else if rect.right() >= width {
        rect.pos.x = width - rect.w();
        vel.x = -vel.x.abs();
        contact.right = true;
    }

    if rect.pos.y <= 0.0 {
        rect.pos.y = 0.0;
        vel.y = vel.y.abs();
        contact.top = true;
    }

    contact
}

/// Horizontal speed after a paddle bounce
///
/// Maps where the ball's center struck across the paddle, from -0.5 (left
/// edge) to +0.5 (right edge), linearly onto `[-max_vx, max_vx]`.
pub fn paddle_bounce_vx(ball: &Rect, paddle: &Rect, max_vx: f32) -> f32 {
    let relative = ((ball.center().x - paddle.x()) / paddle.w() - 0.5).clamp(-0.5, 0.5);
    relative * 2.0 * max_vx
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_intersects_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(intersects(&a, &b));
        assert!(intersects(&b, &a));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!intersects(&a, &b));
        let c = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!intersects(&a, &c));
    }

    #[test]
    fn test_bounce_right_wall() {
        let mut rect = Rect::new(795.0, 100.0, 10.0, 10.0);
        let mut vel = Vec2::new(300.0, -100.0);
        let contact = bounce_off_walls(&mut rect, &mut vel, 800.0);
        assert!(contact.right);
        assert_eq!(rect.x(), 790.0);
        assert_eq!(vel.x, -300.0);
        assert_eq!(vel.y, -100.0);
    }

    #[test]
    fn test_bounce_top_wall() {
        let mut rect = Rect::new(100.0, -3.0, 10.0, 10.0);
        let mut vel = Vec2::new(50.0, -200.0);
        let contact = bounce_off_walls(&mut rect, &mut vel, 800.0);
        assert!(contact.top);
        assert_eq!(rect.y(), 0.0);
        assert_eq!(vel.y, 200.0);
    }

    #[test]
    fn test_paddle_bounce_mapping() {
        let paddle = Rect::new(100.0, 500.0, 100.0, 16.0);
        let center_hit = Rect::from_center(Vec2::new(150.0, 495.0), Vec2::splat(10.0));
        let left_hit = Rect::from_center(Vec2::new(100.0, 495.0), Vec2::splat(10.0));
        let right_hit = Rect::from_center(Vec2::new(200.0, 495.0), Vec2::splat(10.0));
        let beyond = Rect::from_center(Vec2::new(230.0, 495.0), Vec2::splat(10.0));
        assert_eq!(paddle_bounce_vx(&center_hit, &paddle, 400.0), 0.0);
        assert_eq!(paddle_bounce_vx(&left_hit, &paddle, 400.0), -400.0);
        assert_eq!(paddle_bounce_vx(&right_hit, &paddle, 400.0), 400.0);
        assert_eq!(paddle_bounce_vx(&beyond, &paddle, 400.0), 400.0);
    }

    proptest! {
        #[test]
        fn prop_side_wall_flip_and_clamp(x in -50.0f32..850.0, vx in -600.0f32..600.0) {
            let mut rect = Rect::new(x, 300.0, 10.0, 10.0);
            let mut vel = Vec2::new(vx, 100.0);
            let contact = bounce_off_walls(&mut rect, &mut vel, 800.0);

            prop_assert!(rect.x() >= 0.0 && rect.x() <= 790.0);
            let crossed_left = x <= 0.0;
            let crossed_right = x + 10.0 >= 800.0;
            prop_assert_eq!(contact.left, crossed_left);
            prop_assert_eq!(contact.right, crossed_right && !crossed_left);
            if !contact.left && !contact.right {
                prop_assert_eq!(vel.x, vx);
            }
            if crossed_left && vx < 0.0 {
                prop_assert_eq!(vel.x, -vx);
            }
            if crossed_right && !crossed_left && vx > 0.0 {
                prop_assert_eq!(vel.x, -vx);
            }
        }
    }
}
