use std::fmt;
use std::marker::PhantomData;

/// String backed identifier, typed by a zero sized tag so that ids of different
/// kinds can not be mixed up (a `DeviceId` is never accepted where a `ConnectivityId` is expected).
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Hash)]
pub struct Id<T> {
    pub id: String,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    pub fn new(id: impl Into<String>) -> Self {
        Id { id: id.into(), _marker: PhantomData }
    }

    pub fn as_str(&self) -> &str {
        &self.id
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl<T> From<Id<T>> for String {
    fn from(id_wrapper: Id<T>) -> Self {
        id_wrapper.id
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let full_name = std::any::type_name::<T>();
        let clean_name = full_name.split("::").last().unwrap_or(full_name);
        let display_name = clean_name.replace("Tag", "Id");

        write!(f, "{}: {:?}", display_name, self.id)
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
pub struct ConnectivityTag;
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
pub struct DeviceTag;
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
pub struct ReservationHandleTag;

pub type ConnectivityId = Id<ConnectivityTag>;
pub type DeviceId = Id<DeviceTag>;

/// Correlates a connectivity request with the bandwidth reservation an external
/// allocator made on its behalf.
pub type ReservationHandle = Id<ReservationHandleTag>;

impl ConnectivityId {
    /// Creates a fresh, random connectivity id.
    pub fn generate() -> Self {
        Id::new(uuid::Uuid::new_v4().to_string())
    }
}
