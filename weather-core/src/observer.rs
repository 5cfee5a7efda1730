use std::{cell::RefCell, fmt::Debug, rc::Rc};

use crate::model::Reading;

/// Anything that wants to hear about new station readings.
pub trait Observer: Debug {
    /// Name used as the prefix of every line the observer emits.
    fn name(&self) -> &str;

    /// React to a freshly stored reading.
    fn update(&mut self, reading: &Reading) -> anyhow::Result<()>;
}

/// Handle the station keeps in its registry. Identity is the allocation,
/// so two clones of one handle are the same observer.
pub type SharedObserver = Rc<RefCell<dyn Observer>>;

/// Wrap a concrete observer into a registry handle.
pub fn shared<O: Observer + 'static>(observer: O) -> SharedObserver {
    Rc::new(RefCell::new(observer))
}

/// Handle identity. Only data pointers are compared; vtable pointers are not unique.
pub fn same_observer<A: ?Sized, B: ?Sized>(a: &Rc<RefCell<A>>, b: &Rc<RefCell<B>>) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}
