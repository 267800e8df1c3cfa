use tracing::{debug, info, warn};

use crate::capabilities::{Capabilities, TimerOutput};
use crate::contacts::ContactId;
use crate::emergency::CountdownStep;
use crate::event::Event;
use crate::model::Model;
use crate::view::ViewModel;
use crate::{
    COUNTDOWN_TICK_INTERVAL, LOCATION_DRIFT_DEGREES, LOCATION_TICK_INTERVAL, MAP_INIT_DELAY,
};

#[derive(Default)]
pub struct App;

impl App {
    fn start_session(model: &mut Model, caps: &Capabilities) {
        if !model.location.begin_init() {
            debug!("session already started, ignoring");
            return;
        }
        info!("session started, warming up map provider");
        let id = caps.timer.start(MAP_INIT_DELAY, Event::MapProviderLoaded);
        model.location.arm_init(id);
    }

    fn stop_session(model: &mut Model, caps: &Capabilities) {
        let handles = model.release_timers();
        info!(count = handles.len(), "session stopped, clearing timers");
        for id in handles {
            caps.timer.clear(id);
        }
    }

    fn trigger_emergency(model: &mut Model, caps: &Capabilities) {
        if !model.emergency.trigger() {
            debug!("emergency already engaged, ignoring trigger");
            return;
        }
        info!("emergency engaged, notifying trusted contacts");
        let id = caps.timer.start(COUNTDOWN_TICK_INTERVAL, Event::CountdownTicked);
        model.emergency.arm(id);
    }

    fn cancel_emergency(model: &mut Model, caps: &Capabilities) {
        let was_active = model.emergency.is_active();
        if let Some(id) = model.emergency.cancel() {
            caps.timer.clear(id);
        }
        if was_active {
            info!("emergency cancelled");
        }
    }

    fn countdown_ticked(output: &TimerOutput, model: &mut Model, caps: &Capabilities) {
        match model.emergency.on_tick(output) {
            CountdownStep::Ticked { remaining } if remaining > 0 => {
                debug!(remaining, "countdown tick");
                let id = caps.timer.start(COUNTDOWN_TICK_INTERVAL, Event::CountdownTicked);
                model.emergency.arm(id);
            }
            CountdownStep::Ticked { .. } => {
                info!("countdown exhausted, emergency stays engaged");
            }
            CountdownStep::Stale => {
                warn!(id = %output.id(), "stale countdown completion ignored");
            }
        }
    }

    fn map_provider_loaded(output: &TimerOutput, model: &mut Model, caps: &Capabilities) {
        if model.location.complete_init(output) {
            info!("map provider ready, live location begins");
            let id = caps.timer.start(LOCATION_TICK_INTERVAL, Event::LocationTicked);
            model.location.arm_drift(id);
        } else {
            warn!(id = %output.id(), "stale map provider completion ignored");
        }
    }

    fn location_ticked(output: &TimerOutput, model: &mut Model, caps: &Capabilities) {
        use rand::Rng;

        let mut rng = rand::thread_rng();
        let dlat = rng.gen_range(-LOCATION_DRIFT_DEGREES..=LOCATION_DRIFT_DEGREES);
        let dlng = rng.gen_range(-LOCATION_DRIFT_DEGREES..=LOCATION_DRIFT_DEGREES);

        if model.location.apply_drift(output, dlat, dlng) {
            let coordinate = model.location.coordinate();
            debug!(
                lat = coordinate.lat(),
                lng = coordinate.lng(),
                "position drifted"
            );
            let id = caps.timer.start(LOCATION_TICK_INTERVAL, Event::LocationTicked);
            model.location.arm_drift(id);
        } else {
            warn!(id = %output.id(), "stale location completion ignored");
        }
    }

    fn toggle_sharing(contact_id: ContactId, model: &mut Model) {
        match model.contacts.toggle_sharing(contact_id) {
            Ok(sharing) => debug!(%contact_id, sharing, "sharing toggled"),
            Err(error) => warn!(%error, "sharing toggle rejected"),
        }
    }

    fn submit_contact(model: &mut Model) {
        match model.contacts.add_contact(&model.draft) {
            Ok(id) => {
                info!(%id, "contact added");
                model.draft.clear();
                model.add_contact_open = false;
            }
            Err(error) => {
                warn!(%error, "contact draft rejected");
            }
        }
    }
}

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Capabilities = Capabilities;

    fn update(&self, event: Self::Event, model: &mut Self::Model, caps: &Self::Capabilities) {
        match event {
            Event::Started => Self::start_session(model, caps),
            Event::Stopped => Self::stop_session(model, caps),

            Event::TabSelected(tab) => {
                debug!(?tab, "tab selected");
                model.active_tab = tab;
            }
            Event::MenuOpened => model.menu_open = true,
            Event::MenuClosed => model.menu_open = false,

            Event::EmergencyTriggered => Self::trigger_emergency(model, caps),
            Event::EmergencyCancelled => Self::cancel_emergency(model, caps),
            Event::CountdownTicked(output) => Self::countdown_ticked(&output, model, caps),

            Event::MapProviderLoaded(output) => Self::map_provider_loaded(&output, model, caps),
            Event::LocationTicked(output) => Self::location_ticked(&output, model, caps),

            Event::SharingToggled { contact_id } => Self::toggle_sharing(contact_id, model),
            Event::AddContactOpened => model.add_contact_open = true,
            Event::AddContactClosed => {
                model.add_contact_open = false;
                model.draft.clear();
            }
            Event::DraftNameChanged(name) => model.draft.name = name,
            Event::DraftRelationChanged(relation) => model.draft.relation = relation,
            Event::DraftPhoneChanged(phone) => model.draft.phone = phone,
            Event::ContactSubmitted => Self::submit_contact(model),
        }

        caps.render.render();
    }

    fn view(&self, model: &Self::Model) -> Self::ViewModel {
        ViewModel::from(model)
    }
}
