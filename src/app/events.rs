use crate::app::LoadTicket;
use crate::player::{DeviceInfo, ErrorKind, LibraryItem};
use crate::sync::SyncEvent;
use crossterm::event::Event;

pub enum AppEvent {
    Input(Event),
    Sync(SyncEvent),
    /// Items for a library tab, or for a drill-down titled by the string
    LibraryLoaded(LoadTicket, Option<String>, Vec<LibraryItem>),
    DevicesLoaded(Vec<DeviceInfo>),
    /// A background library action finished; message for a toast
    Notice(String),
    LibraryFailed(ErrorKind),
    Tick,
}
