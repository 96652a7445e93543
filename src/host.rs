//! Host loop: owns mounted components, feeds them ticks, and collects the
//! draw commands of every component that reported a change.

use std::collections::BTreeMap;

use crate::effects::Component;
use crate::geometry::Size;
use crate::jobs::{change_flags, ChangeFlags, ComponentId, JobQueue, JobType};
use crate::paint::{Color, DrawCommand, PaintContext};

pub struct HostConfig {
    /// Longest delta forwarded to components in one tick
    pub max_tick_ms: f32,
    pub background: Color,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            max_tick_ms: 250.0,
            background: Color::DARK_BACKGROUND,
        }
    }
}

/// Draw commands of one mounted component
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub component: ComponentId,
    pub size: Size,
    pub commands: Vec<DrawCommand>,
}

/// Output of [`Host::paint`]
#[derive(Debug, Clone)]
pub struct Frame {
    pub background: Color,
    /// Every mounted component, in mount order
    pub layers: Vec<Layer>,
    /// What the drained jobs asked for
    pub flags: ChangeFlags,
    /// Number of components repainted for this frame
    pub repainted: usize,
}

impl Frame {
    pub fn layer(&self, component: ComponentId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.component == component)
    }
}

struct Mounted {
    component: Box<dyn Component>,
    size: Size,
    commands: Vec<DrawCommand>,
}

pub struct Host {
    config: HostConfig,
    queue: JobQueue,
    components: BTreeMap<ComponentId, Mounted>,
    next_id: u64,
}

impl Host {
    pub fn new() -> Self {
        Self::with_config(HostConfig::default())
    }

    pub fn with_config(config: HostConfig) -> Self {
        Self {
            config,
            queue: JobQueue::new(),
            components: BTreeMap::new(),
            next_id: 0,
        }
    }

    pub fn max_tick(mut self, max_tick_ms: f32) -> Self {
        self.config.max_tick_ms = max_tick_ms;
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.config.background = color;
        self
    }

    /// Take ownership of a component and bind it to this host's queue.
    pub fn mount(&mut self, component: impl Component + 'static) -> ComponentId {
        let id = ComponentId(self.next_id);
        self.next_id += 1;

        let mut component: Box<dyn Component> = Box::new(component);
        component.bind(self.queue.invalidator(id));
        log::info!("Mounted {} as {}", component.name(), id);

        self.components.insert(
            id,
            Mounted {
                component,
                size: Size::ZERO,
                commands: Vec::new(),
            },
        );
        self.queue.push(id, JobType::Paint);
        id
    }

    /// Stop and drop a component. Returns false for unknown ids.
    pub fn unmount(&mut self, id: ComponentId) -> bool {
        let Some(mut mounted) = self.components.remove(&id) else {
            return false;
        };
        mounted.component.unmount();
        self.queue.forget(id);
        log::info!("Unmounted {} ({})", id, mounted.component.name());
        true
    }

    pub fn resize(&mut self, id: ComponentId, size: Size) {
        let Some(mounted) = self.components.get_mut(&id) else {
            log::debug!("Resize for unknown component {}", id);
            return;
        };
        if mounted.size == size {
            return;
        }
        mounted.size = size;
        mounted.component.resize(size);
        self.queue.push(id, JobType::Layout);
    }

    /// Forward a pointer drag to a component.
    pub fn drag(&mut self, id: ComponentId, dx: f32, dy: f32) {
        if let Some(mounted) = self.components.get_mut(&id) {
            mounted.component.drag(dx, dy);
        }
    }

    /// Advance every component by `dt_ms`.
    ///
    /// Negative or non-finite deltas are ignored; long stalls are clamped to
    /// [`HostConfig::max_tick_ms`].
    pub fn tick(&mut self, dt_ms: f32) {
        if !dt_ms.is_finite() || dt_ms < 0.0 {
            log::debug!("Ignoring tick delta {}", dt_ms);
            return;
        }
        let dt_ms = dt_ms.min(self.config.max_tick_ms.max(0.0));
        for mounted in self.components.values_mut() {
            mounted.component.tick(dt_ms);
        }
    }

    /// Repaint components with pending jobs and return the whole frame.
    pub fn paint(&mut self) -> Frame {
        let jobs = self.queue.drain();
        let flags = change_flags(&jobs);

        let mut dirty: Vec<ComponentId> = jobs.iter().map(|job| job.component).collect();
        dirty.sort();
        dirty.dedup();

        let mut repainted = 0;
        for id in dirty {
            // Jobs of components unmounted since they were queued
            let Some(mounted) = self.components.get_mut(&id) else {
                continue;
            };
            let mut ctx = PaintContext::new(mounted.size);
            mounted.component.paint(&mut ctx);
            mounted.commands = ctx.into_commands();
            repainted += 1;
        }
        if repainted > 0 {
            log::trace!("Repainted {} component(s), flags {:?}", repainted, flags);
        }

        Frame {
            background: self.config.background,
            layers: self
                .components
                .iter()
                .map(|(id, mounted)| Layer {
                    component: *id,
                    size: mounted.size,
                    commands: mounted.commands.clone(),
                })
                .collect(),
            flags,
            repainted,
        }
    }

    /// True while any component still changes over time.
    pub fn is_animating(&self) -> bool {
        self.components
            .values()
            .any(|mounted| mounted.component.is_animating())
    }

    pub fn has_pending_jobs(&self) -> bool {
        self.queue.has_pending_jobs()
    }

    pub fn contains(&self, id: ComponentId) -> bool {
        self.components.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }
}

impl Default for Host {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{BorderConfig, CircleAnimation, CircleBorder, Flashlight, FlashlightConfig};

    fn sweep() -> CircleBorder {
        CircleBorder::new(CircleAnimation::Sweep, BorderConfig::circle())
    }

    #[test]
    fn test_mount_paints_on_first_frame() {
        let mut host = Host::new();
        let id = host.mount(sweep());
        host.resize(id, Size::new(100.0, 100.0));

        let frame = host.paint();
        assert!(frame.flags.contains(ChangeFlags::NEEDS_LAYOUT));
        assert_eq!(frame.repainted, 1);
        // Content slot only: nothing swept yet
        assert_eq!(frame.layer(id).map(|l| l.commands.len()), Some(1));

        let frame = host.paint();
        assert!(frame.flags.is_empty());
        assert_eq!(frame.repainted, 0);
    }

    #[test]
    fn test_tick_repaints_changed_components_only() {
        let mut host = Host::new();
        let border = host.mount(sweep());
        let light = host.mount(Flashlight::new(FlashlightConfig::default()));
        host.resize(border, Size::new(100.0, 100.0));
        host.resize(light, Size::new(100.0, 100.0));
        host.paint();

        host.tick(16.0);
        let frame = host.paint();
        assert_eq!(frame.flags, ChangeFlags::NEEDS_PAINT);
        assert_eq!(frame.repainted, 1);
        assert_eq!(frame.layers.len(), 2);
        assert_eq!(frame.layer(border).map(|l| l.commands.len()), Some(2));
    }

    #[test]
    fn test_oversized_and_invalid_ticks() {
        let mut host = Host::new().max_tick(100.0);
        let id = host.mount(CircleBorder::new(
            CircleAnimation::Sweep,
            BorderConfig::circle().duration(1000.0),
        ));
        host.resize(id, Size::new(100.0, 100.0));
        host.tick(f32::NAN);
        host.tick(-5.0);
        host.tick(5000.0);
        let frame = host.paint();
        let swept = frame.layer(id).and_then(|l| {
            l.commands.iter().find_map(|c| match c {
                DrawCommand::Arc { sweep_angle, .. } => Some(*sweep_angle),
                _ => None,
            })
        });
        assert_eq!(swept, Some(36.0));
    }

    #[test]
    fn test_unmount_drops_jobs_and_component() {
        let mut host = Host::new();
        let id = host.mount(sweep());
        host.tick(100.0);
        assert!(host.has_pending_jobs());

        assert!(host.unmount(id));
        assert!(!host.has_pending_jobs());
        assert!(!host.contains(id));
        assert!(!host.unmount(id));

        host.tick(100.0);
        assert!(!host.has_pending_jobs());
        assert!(host.paint().layers.is_empty());
        assert!(!host.is_animating());
    }

    #[test]
    fn test_drag_reaches_component() {
        let mut host = Host::new();
        let id = host.mount(Flashlight::new(FlashlightConfig::default()));
        host.resize(id, Size::new(100.0, 100.0));
        host.paint();

        host.drag(id, 10.0, 0.0);
        let frame = host.paint();
        assert_eq!(frame.repainted, 1);
        let center = frame.layer(id).and_then(|l| {
            l.commands.iter().find_map(|c| match c {
                DrawCommand::RadialMask { center, .. } => Some(center.x),
                _ => None,
            })
        });
        assert_eq!(center, Some(60.0));
    }
}
