//! Work deferred to the next paint tick.

use crate::ItemRenderer;

/// Layout-mutating work waiting for a [`GalleryEvent::Frame`](crate::GalleryEvent::Frame).
///
/// Requests of the same kind coalesce: only the latest width and the latest
/// updater survive until the tick.
#[derive(Default)]
pub(crate) struct FrameQueue {
    reposition: Option<f32>,
    item_update: Option<ItemRenderer>,
    requested: bool,
}

/// Work taken off the queue for one tick.
pub(crate) struct FrameWork {
    pub(crate) reposition: Option<f32>,
    pub(crate) item_update: Option<ItemRenderer>,
}

impl FrameQueue {
    /// Queues a reposition. Returns true if the host must be asked for a frame.
    pub(crate) fn schedule_reposition(&mut self, width: f32) -> bool {
        self.reposition = Some(width);
        self.request()
    }

    /// Queues an updater. Returns true if the host must be asked for a frame.
    pub(crate) fn schedule_item_update(&mut self, updater: ItemRenderer) -> bool {
        self.item_update = Some(updater);
        self.request()
    }

    pub(crate) fn take(&mut self) -> FrameWork {
        self.requested = false;
        FrameWork {
            reposition: self.reposition.take(),
            item_update: self.item_update.take(),
        }
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.reposition.is_some() || self.item_update.is_some()
    }

    fn request(&mut self) -> bool {
        !std::mem::replace(&mut self.requested, true)
    }
}
