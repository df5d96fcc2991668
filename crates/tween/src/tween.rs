use crate::ease::Ease;
use glam::Vec3;
use latticeview_common::{NodeId, Transform};

/// An animatable transform field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    PositionX,
    PositionY,
    PositionZ,
    RotationX,
    RotationY,
    RotationZ,
    ScaleX,
    ScaleY,
    ScaleZ,
}

impl Property {
    pub fn get(&self, t: &Transform) -> f32 {
        match self {
            Self::PositionX => t.position.x,
            Self::PositionY => t.position.y,
            Self::PositionZ => t.position.z,
            Self::RotationX => t.rotation.x,
            Self::RotationY => t.rotation.y,
            Self::RotationZ => t.rotation.z,
            Self::ScaleX => t.scale.x,
            Self::ScaleY => t.scale.y,
            Self::ScaleZ => t.scale.z,
        }
    }

    pub fn set(&self, t: &mut Transform, value: f32) {
        let slot = match self {
            Self::PositionX => &mut t.position.x,
            Self::PositionY => &mut t.position.y,
            Self::PositionZ => &mut t.position.z,
            Self::RotationX => &mut t.rotation.x,
            Self::RotationY => &mut t.rotation.y,
            Self::RotationZ => &mut t.rotation.z,
            Self::ScaleX => &mut t.scale.x,
            Self::ScaleY => &mut t.scale.y,
            Self::ScaleZ => &mut t.scale.z,
        };
        *slot = value;
    }
}

/// How many times a tween plays after its first cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Repeat {
    #[default]
    Never,
    Count(u32),
    Infinite,
}

impl Repeat {
    /// gsap-style count: any negative value repeats forever.
    pub fn from_count(n: i32) -> Self {
        match n {
            0 => Self::Never,
            n if n < 0 => Self::Infinite,
            n => Self::Count(n as u32),
        }
    }

    fn extra_cycles(&self) -> Option<u32> {
        match self {
            Self::Never => Some(0),
            Self::Count(n) => Some(*n),
            Self::Infinite => None,
        }
    }
}

/// Tween parameters: targets plus timing.
#[derive(Debug, Clone, PartialEq)]
pub struct TweenVars {
    pub duration: f32,
    pub delay: f32,
    pub repeat: Repeat,
    pub yoyo: bool,
    pub ease: Ease,
    pub targets: Vec<(Property, f32)>,
}

impl TweenVars {
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            delay: 0.0,
            repeat: Repeat::Never,
            yoyo: false,
            ease: Ease::default(),
            targets: Vec::new(),
        }
    }

    pub fn to(mut self, property: Property, value: f32) -> Self {
        self.targets.retain(|(p, _)| *p != property);
        self.targets.push((property, value));
        self
    }

    pub fn position(self, p: Vec3) -> Self {
        self.to(Property::PositionX, p.x)
            .to(Property::PositionY, p.y)
            .to(Property::PositionZ, p.z)
    }

    pub fn rotation(self, r: Vec3) -> Self {
        self.to(Property::RotationX, r.x)
            .to(Property::RotationY, r.y)
            .to(Property::RotationZ, r.z)
    }

    pub fn rotation_x(self, radians: f32) -> Self {
        self.to(Property::RotationX, radians)
    }

    pub fn scale(self, s: Vec3) -> Self {
        self.to(Property::ScaleX, s.x)
            .to(Property::ScaleY, s.y)
            .to(Property::ScaleZ, s.z)
    }

    pub fn delay(mut self, seconds: f32) -> Self {
        self.delay = seconds;
        self
    }

    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn yoyo(mut self, yoyo: bool) -> Self {
        self.yoyo = yoyo;
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Active length in seconds, `None` when it repeats forever.
    pub fn total_duration(&self) -> Option<f32> {
        self.repeat
            .extra_cycles()
            .map(|n| self.duration.max(0.0) * (n as f32 + 1.0))
    }
}

/// A running tween bound to one node.
#[derive(Debug, Clone)]
pub struct Tween {
    node: NodeId,
    vars: TweenVars,
    elapsed: f64,
    start: Option<Vec<f32>>,
    finished: bool,
}

impl Tween {
    pub fn new(node: NodeId, vars: TweenVars) -> Self {
        Self {
            node,
            vars,
            elapsed: 0.0,
            start: None,
            finished: false,
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn vars(&self) -> &TweenVars {
        &self.vars
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn has_started(&self) -> bool {
        self.start.is_some()
    }

    /// Advance by `dt` seconds and write the current values into `transform`.
    /// Returns true once the tween has finished.
    pub fn advance(&mut self, dt: f32, transform: &mut Transform) -> bool {
        if self.finished {
            return true;
        }
        self.elapsed += f64::from(dt.max(0.0));
        let active = self.elapsed - f64::from(self.vars.delay.max(0.0));
        if active < 0.0 {
            return false;
        }

        let start = self
            .start
            .get_or_insert_with(|| self.vars.targets.iter().map(|(p, _)| p.get(transform)).collect());

        let duration = f64::from(self.vars.duration);
        let (cycle, progress) = if duration <= 0.0 {
            self.finished = true;
            (0, 1.0)
        } else {
            match self.vars.repeat.extra_cycles() {
                Some(extra) if active >= duration * (f64::from(extra) + 1.0) => {
                    self.finished = true;
                    (u64::from(extra), 1.0)
                }
                _ => {
                    let cycle = (active / duration).floor();
                    (cycle as u64, (active - cycle * duration) / duration)
                }
            }
        };

        let progress = if self.vars.yoyo && cycle % 2 == 1 {
            1.0 - progress
        } else {
            progress
        };
        let ratio = self.vars.ease.apply(progress as f32);

        for ((property, end), from) in self.vars.targets.iter().zip(start.iter()) {
            property.set(transform, from + (end - from) * ratio);
        }
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    fn linear(duration: f32) -> TweenVars {
        TweenVars::new(duration).ease(Ease::Linear)
    }

    #[test]
    fn property_get_set() {
        let mut t = Transform::default();
        Property::RotationY.set(&mut t, 1.5);
        Property::ScaleZ.set(&mut t, 3.0);
        assert_eq!(Property::RotationY.get(&t), 1.5);
        assert_eq!(t.scale, Vec3::new(1.0, 1.0, 3.0));
    }

    #[test]
    fn repeat_from_gsap_count() {
        assert_eq!(Repeat::from_count(-1), Repeat::Infinite);
        assert_eq!(Repeat::from_count(0), Repeat::Never);
        assert_eq!(Repeat::from_count(3), Repeat::Count(3));
    }

    #[test]
    fn later_target_replaces_earlier() {
        let vars = TweenVars::new(1.0).rotation_x(1.0).rotation_x(2.0);
        assert_eq!(vars.targets, vec![(Property::RotationX, 2.0)]);
    }

    #[test]
    fn total_duration_counts_repeats() {
        assert_eq!(TweenVars::new(2.0).total_duration(), Some(2.0));
        assert_eq!(
            TweenVars::new(2.0).repeat(Repeat::Count(2)).total_duration(),
            Some(6.0)
        );
        assert_eq!(
            TweenVars::new(2.0).repeat(Repeat::Infinite).total_duration(),
            None
        );
    }

    #[test]
    fn linear_midpoint() {
        let mut t = Transform::from_position(Vec3::new(2.0, 0.0, 0.0));
        let mut tw = Tween::new(NodeId::new(), linear(2.0).position(Vec3::ZERO));
        assert!(!tw.advance(1.0, &mut t));
        assert_eq!(t.position, Vec3::new(1.0, 0.0, 0.0));
        assert!(tw.advance(1.0, &mut t));
        assert_eq!(t.position, Vec3::ZERO);
    }

    #[test]
    fn start_values_are_captured_lazily() {
        let mut t = Transform::default();
        let mut tw = Tween::new(NodeId::new(), linear(1.0).delay(1.0).rotation_x(1.0));
        tw.advance(0.5, &mut t);
        assert!(!tw.has_started());
        // Moved before the delay ran out; the tween starts from here.
        t.rotation.x = 0.5;
        tw.advance(1.0, &mut t);
        assert!(tw.has_started());
        assert!((t.rotation.x - 0.75).abs() < 1e-6);
    }

    #[test]
    fn yoyo_infinite_swings_back() {
        let mut t = Transform::default();
        let vars = TweenVars::new(2.0)
            .rotation_x(TAU)
            .repeat(Repeat::Infinite)
            .yoyo(true)
            .ease(Ease::POWER1_IN_OUT);
        let mut tw = Tween::new(NodeId::new(), vars);

        assert!(!tw.advance(2.0, &mut t));
        assert!((t.rotation.x - TAU).abs() < 1e-5);
        assert!(!tw.advance(1.0, &mut t));
        assert!((t.rotation.x - TAU / 2.0).abs() < 1e-5);
        assert!(!tw.advance(1.0, &mut t));
        assert!(t.rotation.x.abs() < 1e-5);
        // Still running long after.
        assert!(!tw.advance(1000.0, &mut t));
    }

    #[test]
    fn finite_yoyo_ends_where_the_last_cycle_points() {
        // Two cycles: out and back.
        let mut t = Transform::default();
        let mut tw = Tween::new(
            NodeId::new(),
            linear(1.0).to(Property::PositionY, 4.0).repeat(Repeat::Count(1)).yoyo(true),
        );
        assert!(tw.advance(5.0, &mut t));
        assert_eq!(t.position.y, 0.0);

        // Three cycles: out, back, out.
        let mut t = Transform::default();
        let mut tw = Tween::new(
            NodeId::new(),
            linear(1.0).to(Property::PositionY, 4.0).repeat(Repeat::Count(2)).yoyo(true),
        );
        assert!(tw.advance(5.0, &mut t));
        assert_eq!(t.position.y, 4.0);
    }

    #[test]
    fn repeat_without_yoyo_restarts() {
        let mut t = Transform::default();
        let mut tw = Tween::new(
            NodeId::new(),
            linear(1.0).to(Property::ScaleX, 3.0).repeat(Repeat::Count(1)),
        );
        tw.advance(1.5, &mut t);
        assert!((t.scale.x - 2.0).abs() < 1e-6);
    }

    #[test]
    fn zero_duration_jumps_to_end() {
        let mut t = Transform::default();
        let mut tw = Tween::new(
            NodeId::new(),
            TweenVars::new(0.0).position(Vec3::ONE).repeat(Repeat::Infinite),
        );
        assert!(tw.advance(0.0, &mut t));
        assert_eq!(t.position, Vec3::ONE);
    }

    #[test]
    fn finished_tween_stops_writing() {
        let mut t = Transform::default();
        let mut tw = Tween::new(NodeId::new(), linear(1.0).rotation_x(1.0));
        assert!(tw.advance(2.0, &mut t));
        t.rotation.x = 9.0;
        assert!(tw.advance(1.0, &mut t));
        assert_eq!(t.rotation.x, 9.0);
    }
}
