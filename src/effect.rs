use crate::geodesy::Meters;
use crate::geodesy::Waypoint;
use crate::parabola::sample_arc;
use crate::parabola::Arc;

use alloc::rc::Rc;
use alloc::vec::Vec;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FlowEffectConfig {
    /// flow lines drawn per endpoint pair
    pub instances: usize,
    pub width: f32,
    /// apex used when the start sits higher than the end
    pub low_apex: Meters,
    pub high_apex: Meters,
    pub sample_count: usize,
}

impl Default for FlowEffectConfig {
    fn default() -> Self {
        Self {
            instances: 1,
            width: 2.0,
            low_apex: 100_000.0,
            high_apex: 200_000.0,
            sample_count: 100,
        }
    }
}

/// One polyline handed to the host renderer. The arc is shared between all
/// instances created for the same endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowLineInstance<M> {
    pub positions: Rc<Arc>,
    pub material: M,
    pub depth_fail_material: Option<M>,
    pub width: f32,
}

/// The host's entity API.
pub trait EntityCollection<M> {
    type Handle;

    fn add_polyline(&mut self, line: FlowLineInstance<M>) -> Self::Handle;
}

pub fn apex_height_for(config: &FlowEffectConfig, start: Waypoint, end: Waypoint) -> Meters {
    match start.height > end.height {
        true => config.low_apex,
        false => config.high_apex,
    }
}

/// Samples the arc from `start` to `end` once and registers
/// `config.instances` flow lines drawing it.
pub fn parabola_flow_init<M: Clone, E: EntityCollection<M>>(
    entities: &mut E,
    config: &FlowEffectConfig,
    start: Waypoint,
    end: Waypoint,
    material: M,
    depth_fail_material: Option<M>,
) -> Vec<E::Handle> {
    let apex = apex_height_for(config, start, end);
    let arc = Rc::new(sample_arc(start.position, end.position, apex, config.sample_count));

    log::info!("adding {} flow lines {:?} -> {:?} (apex {})", config.instances, start.position, end.position, arc.apex());

    let mut handles = Vec::with_capacity(config.instances);
    for _ in 0..config.instances {
        handles.push(entities.add_polyline(FlowLineInstance {
            positions: arc.clone(),
            material: material.clone(),
            depth_fail_material: depth_fail_material.clone(),
            width: config.width,
        }));
    }
    handles
}

/// [`parabola_flow_init`] from one `center` to each of `targets`.
pub fn parabola_flow_fan_out<M: Clone, E: EntityCollection<M>>(
    entities: &mut E,
    config: &FlowEffectConfig,
    center: Waypoint,
    targets: &[Waypoint],
    material: M,
    depth_fail_material: Option<M>,
) -> Vec<E::Handle> {
    let mut handles = Vec::with_capacity(targets.len() * config.instances);
    for target in targets {
        let batch = parabola_flow_init(entities, config, center, *target, material.clone(), depth_fail_material.clone());
        handles.extend(batch);
    }
    handles
}
