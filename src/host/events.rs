//! Event binder: keeps an input's subscriptions in step with its attribute bag.
//!
//! Only inputs carry subscriptions; every function here is a silent no-op for
//! the other kinds. Channels are handled independently, so changing the
//! `on_enter` handler never touches the `on_input` subscription.

use tracing::{trace, warn};

use crate::dom::node::{Instance, InstanceKind};
use crate::event::Channel;
use crate::vnode::attrs::Attributes;

/// Attach every handler present in `attrs`.
///
/// A channel already bound to the same handler is left alone; a channel bound
/// to a different handler has it detached first. Returns how many
/// subscriptions were newly attached.
pub fn bind(instance: &mut Instance, attrs: &Attributes) -> usize {
    let identity = instance.identity().to_owned();
    let subs = match &mut instance.kind {
        InstanceKind::Input(props) => &mut props.subscriptions,
        InstanceKind::Box(_) | InstanceKind::Group | InstanceKind::Text(_) => return 0,
    };

    let mut attached = 0;
    for channel in Channel::ALL {
        let Some(handler) = attrs.handler(channel) else {
            continue;
        };
        if subs.is_bound(channel, handler) {
            continue;
        }
        if let Some(old) = subs.attach(channel, handler.clone()) {
            trace!(instance = %identity, %channel, ?old, "replaced handler");
        } else {
            trace!(instance = %identity, %channel, "bound handler");
        }
        attached += 1;
    }
    attached
}

/// Detach every handler in `attrs` that is currently bound on its channel.
///
/// Handlers that are not the bound one are ignored. Returns how many
/// subscriptions were detached.
pub fn unbind(instance: &mut Instance, attrs: &Attributes) -> usize {
    let identity = instance.identity().to_owned();
    let subs = match &mut instance.kind {
        InstanceKind::Input(props) => &mut props.subscriptions,
        InstanceKind::Box(_) | InstanceKind::Group | InstanceKind::Text(_) => return 0,
    };

    let mut detached = 0;
    for channel in Channel::ALL {
        if let Some(handler) = attrs.handler(channel) {
            if subs.detach(channel, handler) {
                trace!(instance = %identity, %channel, "unbound handler");
                detached += 1;
            }
        }
    }
    detached
}

/// Move subscriptions from `prev` to `next`, channel by channel.
///
/// After this call each channel is bound to exactly `next`'s handler, or to
/// nothing if `next` has none. Unchanged handler identities are not touched.
pub fn rebind(instance: &mut Instance, prev: &Attributes, next: &Attributes) {
    let identity = instance.identity().to_owned();
    let subs = match &mut instance.kind {
        InstanceKind::Input(props) => &mut props.subscriptions,
        InstanceKind::Box(_) | InstanceKind::Group | InstanceKind::Text(_) => return,
    };

    for channel in Channel::ALL {
        let wanted = next.handler(channel);
        if let (Some(current), Some(wanted)) = (subs.get(channel), wanted) {
            if current.same(wanted) {
                continue;
            }
        }

        if let Some(current) = subs.detach_channel(channel) {
            if prev.handler(channel).is_some_and(|p| !p.same(&current)) {
                warn!(
                    instance = %identity,
                    %channel,
                    "bound handler did not match the previous attributes"
                );
            }
            trace!(instance = %identity, %channel, "unbound handler");
        }
        if let Some(wanted) = wanted {
            subs.attach(channel, wanted.clone());
            trace!(instance = %identity, %channel, "bound handler");
        }
    }
}

/// Detach everything. Used at teardown; returns the number detached.
pub fn unbind_all(instance: &mut Instance) -> usize {
    match &mut instance.kind {
        InstanceKind::Input(props) => props.subscriptions.clear(),
        InstanceKind::Box(_) | InstanceKind::Group | InstanceKind::Text(_) => 0,
    }
}
