use crate::ease::{Ease, EaseParseError};
use crate::engine::{TweenId, Tweens};
use crate::tween::{Repeat, TweenVars};
use glam::Vec3;
use latticeview_common::NodeId;
use latticeview_scene::config::TweenConfig;
use std::f32::consts::TAU;

/// Give every cube two tweens: a full turn about X, and a slide to the origin.
///
/// With the default config both run for 2s, yoyo forever with `power1.inOut`,
/// so the lattice collapses onto the origin while spinning and opens again.
pub fn animate_lattice(
    tweens: &mut Tweens,
    cubes: &[NodeId],
    config: &TweenConfig,
) -> Result<Vec<TweenId>, EaseParseError> {
    let ease: Ease = config.ease.parse()?;
    let base = TweenVars::new(config.duration)
        .repeat(Repeat::from_count(config.repeat))
        .yoyo(config.yoyo)
        .ease(ease);

    let mut ids = Vec::with_capacity(cubes.len() * 2);
    for &cube in cubes {
        ids.push(tweens.to(cube, base.clone().rotation_x(TAU)));
        ids.push(tweens.to(cube, base.clone().position(Vec3::ZERO)));
    }
    tracing::debug!("animating {} cubes with {ease}", cubes.len());
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use latticeview_scene::{DemoScene, SceneConfig};

    #[test]
    fn two_tweens_per_cube() {
        let mut demo = DemoScene::build(&SceneConfig::default());
        let mut tweens = Tweens::new();
        let ids = animate_lattice(&mut tweens, &demo.cubes, &TweenConfig::default()).unwrap();
        assert_eq!(ids.len(), 54);
        assert_eq!(tweens.update(0.016, &mut demo.scene), 54);
    }

    #[test]
    fn lattice_collapses_then_reopens() {
        let mut demo = DemoScene::build(&SceneConfig::default());
        let mut tweens = Tweens::new();
        animate_lattice(&mut tweens, &demo.cubes, &TweenConfig::default()).unwrap();
        let corner = demo.cubes[0];
        let start = demo.scene.get(corner).unwrap().transform;
        assert_eq!(start.position, Vec3::splat(-1.2));

        tweens.update(0.0, &mut demo.scene);
        tweens.update(2.0, &mut demo.scene);
        let collapsed = demo.scene.get(corner).unwrap().transform;
        assert!(collapsed.position.abs_diff_eq(Vec3::ZERO, 1e-5));
        assert!((collapsed.rotation.x - TAU).abs() < 1e-5);

        tweens.update(2.0, &mut demo.scene);
        let reopened = demo.scene.get(corner).unwrap().transform;
        assert!(reopened.position.abs_diff_eq(start.position, 1e-5));
        assert!(reopened.rotation.x.abs() < 1e-5);
    }

    #[test]
    fn bad_ease_name_is_reported() {
        let mut tweens = Tweens::new();
        let config = TweenConfig {
            ease: "wobble".into(),
            ..TweenConfig::default()
        };
        assert!(animate_lattice(&mut tweens, &[NodeId::new()], &config).is_err());
        assert!(tweens.is_empty());
    }
}
