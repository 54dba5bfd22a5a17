//! Typed attribute handles.
//!
//! A handle pairs a descriptor with the Rust type its values decode to. Bind it
//! to a view with [`on`](IntAttr::on) to get a [`Bound`] accessor exposing the
//! get / get-as-string / set / set-staged / unset / unset-staged shapes (plus
//! add/remove for multi-valued attributes).
//!
//! ```
//! use provattr::attributes::{catalog, IntAttr};
//! use provattr::{AttributeView, EntryRef, MemStore};
//!
//! let store = MemStore::new();
//! let view = AttributeView::new(&store, EntryRef::server("mail1"));
//! let port = IntAttr::new(&catalog::MAIL_PORT).on(&view);
//!
//! assert_eq!(port.get(), 80);
//! port.set(8080).unwrap();
//! assert_eq!(port.get(), 8080);
//! assert_eq!(port.as_string().as_deref(), Some("8080"));
//! ```

use super::coerce::{self, ToAttrValue};
use super::descriptor::AttributeDescriptor;
use super::enums::AttrEnum;
use crate::changes::ChangeSet;
use crate::error::Result;
use crate::store::AttributeStore;
use crate::view::AttributeView;
use chrono::{DateTime, Utc};
use std::marker::PhantomData;

/// A descriptor bound to a Rust value type.
pub trait TypedAttr: Copy {
    /// What `get` returns.
    type Value;

    fn descriptor(&self) -> &'static AttributeDescriptor;

    fn read<S: AttributeStore + ?Sized>(&self, view: &AttributeView<'_, S>) -> Self::Value;
}

/// Single-valued handles whose setter takes one typed value.
pub trait ScalarAttr: TypedAttr {
    type Input: ToAttrValue;
}

macro_rules! handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name {
            desc: &'static AttributeDescriptor,
        }

        impl $name {
            pub const fn new(desc: &'static AttributeDescriptor) -> Self {
                Self { desc }
            }

            pub fn on<'v, 's, S: AttributeStore + ?Sized>(
                self,
                view: &'v AttributeView<'s, S>,
            ) -> Bound<'v, 's, S, Self> {
                Bound { view, attr: self }
            }
        }
    };
}

handle!(
    /// Free-form single-valued string.
    StrAttr
);
handle!(
    /// Multi-valued string.
    MultiAttr
);
handle!(IntAttr);
handle!(LongAttr);
handle!(BoolAttr);
handle!(
    /// Interval stored as a human string, read as milliseconds.
    DurationAttr
);
handle!(
    /// Generalized-time timestamp.
    TimeAttr
);

/// Enum-kind attribute decoding to `E`.
#[derive(Debug, Clone, Copy)]
pub struct EnumAttr<E: AttrEnum> {
    desc: &'static AttributeDescriptor,
    _marker: PhantomData<E>,
}

impl<E: AttrEnum> EnumAttr<E> {
    pub const fn new(desc: &'static AttributeDescriptor) -> Self {
        Self {
            desc,
            _marker: PhantomData,
        }
    }

    pub fn on<'v, 's, S: AttributeStore + ?Sized>(
        self,
        view: &'v AttributeView<'s, S>,
    ) -> Bound<'v, 's, S, Self> {
        Bound { view, attr: self }
    }
}

impl TypedAttr for StrAttr {
    type Value = Option<String>;

    fn descriptor(&self) -> &'static AttributeDescriptor {
        self.desc
    }

    fn read<S: AttributeStore + ?Sized>(&self, view: &AttributeView<'_, S>) -> Option<String> {
        view.get(self.desc.name, self.desc.default)
    }
}

impl ScalarAttr for StrAttr {
    type Input = String;
}

impl TypedAttr for MultiAttr {
    type Value = Vec<String>;

    fn descriptor(&self) -> &'static AttributeDescriptor {
        self.desc
    }

    fn read<S: AttributeStore + ?Sized>(&self, view: &AttributeView<'_, S>) -> Vec<String> {
        let values = view.get_multi(self.desc.name);
        match (values.is_empty(), self.desc.default) {
            (true, Some(default)) => vec![default.to_string()],
            _ => values,
        }
    }
}

impl TypedAttr for IntAttr {
    type Value = i32;

    fn descriptor(&self) -> &'static AttributeDescriptor {
        self.desc
    }

    fn read<S: AttributeStore + ?Sized>(&self, view: &AttributeView<'_, S>) -> i32 {
        let default = self.desc.default.and_then(coerce::decode_int).unwrap_or(-1);
        view.get_int(self.desc.name, default)
    }
}

impl ScalarAttr for IntAttr {
    type Input = i32;
}

impl TypedAttr for LongAttr {
    type Value = i64;

    fn descriptor(&self) -> &'static AttributeDescriptor {
        self.desc
    }

    fn read<S: AttributeStore + ?Sized>(&self, view: &AttributeView<'_, S>) -> i64 {
        let default = self.desc.default.and_then(coerce::decode_long).unwrap_or(-1);
        view.get_long(self.desc.name, default)
    }
}

impl ScalarAttr for LongAttr {
    type Input = i64;
}

impl TypedAttr for BoolAttr {
    type Value = bool;

    fn descriptor(&self) -> &'static AttributeDescriptor {
        self.desc
    }

    fn read<S: AttributeStore + ?Sized>(&self, view: &AttributeView<'_, S>) -> bool {
        let default = self.desc.default.is_some_and(coerce::decode_bool);
        view.get_bool(self.desc.name, default)
    }
}

impl ScalarAttr for BoolAttr {
    type Input = bool;
}

impl TypedAttr for DurationAttr {
    type Value = i64;

    fn descriptor(&self) -> &'static AttributeDescriptor {
        self.desc
    }

    fn read<S: AttributeStore + ?Sized>(&self, view: &AttributeView<'_, S>) -> i64 {
        view.get_duration(self.desc.name, self.default_millis())
    }
}

/// Durations are written verbatim, e.g. `"90s"`.
impl ScalarAttr for DurationAttr {
    type Input = String;
}

impl DurationAttr {
    fn default_millis(&self) -> i64 {
        self.desc
            .default
            .and_then(coerce::decode_duration)
            .unwrap_or(-1)
    }
}

impl TypedAttr for TimeAttr {
    type Value = Option<DateTime<Utc>>;

    fn descriptor(&self) -> &'static AttributeDescriptor {
        self.desc
    }

    fn read<S: AttributeStore + ?Sized>(
        &self,
        view: &AttributeView<'_, S>,
    ) -> Option<DateTime<Utc>> {
        let default = self.desc.default.and_then(coerce::decode_timestamp);
        view.get_timestamp(self.desc.name, default)
    }
}

impl ScalarAttr for TimeAttr {
    type Input = DateTime<Utc>;
}

impl<E: AttrEnum> TypedAttr for EnumAttr<E> {
    type Value = Option<E>;

    fn descriptor(&self) -> &'static AttributeDescriptor {
        self.desc
    }

    fn read<S: AttributeStore + ?Sized>(&self, view: &AttributeView<'_, S>) -> Option<E> {
        let default = self.desc.default.and_then(E::from_token);
        view.get_enum(self.desc.name, default)
    }
}

impl<E: AttrEnum + ToAttrValue> ScalarAttr for EnumAttr<E> {
    type Input = E;
}

/// A typed handle bound to a view.
pub struct Bound<'v, 's, S: AttributeStore + ?Sized, A> {
    view: &'v AttributeView<'s, S>,
    attr: A,
}

impl<S: AttributeStore + ?Sized, A: TypedAttr> Bound<'_, '_, S, A> {
    pub fn descriptor(&self) -> &'static AttributeDescriptor {
        self.attr.descriptor()
    }

    fn name(&self) -> &'static str {
        self.attr.descriptor().name
    }

    /// Typed value, or the default.
    pub fn get(&self) -> A::Value {
        self.attr.read(self.view)
    }

    /// First stored string, or the declared default in stored form.
    pub fn as_string(&self) -> Option<String> {
        self.view.get(self.name(), self.descriptor().default)
    }

    /// Whether anything is stored (defaults do not count).
    pub fn is_set(&self) -> bool {
        self.view.stored(self.name()).is_some()
    }

    pub fn unset(&self) -> Result<()> {
        self.view.unset(self.name())
    }

    pub fn unset_in(&self, changes: Option<ChangeSet>) -> ChangeSet {
        self.view.unset_in(self.name(), changes)
    }
}

impl<S: AttributeStore + ?Sized, A: ScalarAttr> Bound<'_, '_, S, A> {
    pub fn set(&self, value: impl Into<A::Input>) -> Result<()> {
        self.view.set(self.name(), value.into())
    }

    pub fn set_in(&self, value: impl Into<A::Input>, changes: Option<ChangeSet>) -> ChangeSet {
        self.view.set_in(self.name(), value.into(), changes)
    }
}

impl<S: AttributeStore + ?Sized> Bound<'_, '_, S, DurationAttr> {
    /// Whole seconds; the default converted likewise.
    pub fn get_secs(&self) -> i64 {
        let default = match self.attr.default_millis() {
            -1 => -1,
            ms => ms / 1000,
        };
        self.view.get_duration_secs(self.name(), default)
    }
}

impl<S: AttributeStore + ?Sized, E: AttrEnum> Bound<'_, '_, S, EnumAttr<E>> {
    /// Write a raw token without checking it against the enum.
    pub fn set_as_string(&self, token: &str) -> Result<()> {
        self.view.set(self.name(), token)
    }

    pub fn set_as_string_in(&self, token: &str, changes: Option<ChangeSet>) -> ChangeSet {
        self.view.set_in(self.name(), token, changes)
    }
}

impl<S: AttributeStore + ?Sized> Bound<'_, '_, S, MultiAttr> {
    /// Replace every value. An empty slice clears the attribute.
    pub fn set<V: ToAttrValue>(&self, values: &[V]) -> Result<()> {
        self.view.set_multi(self.name(), values)
    }

    pub fn set_in<V: ToAttrValue>(&self, values: &[V], changes: Option<ChangeSet>) -> ChangeSet {
        self.view.set_multi_in(self.name(), values, changes)
    }

    pub fn add(&self, value: impl ToAttrValue) -> Result<()> {
        self.view.add_multi(self.name(), value)
    }

    pub fn add_in(&self, value: impl ToAttrValue, changes: Option<ChangeSet>) -> ChangeSet {
        self.view.add_multi_in(self.name(), value, changes)
    }

    pub fn remove(&self, value: impl ToAttrValue) -> Result<()> {
        self.view.remove_multi(self.name(), value)
    }

    pub fn remove_in(&self, value: impl ToAttrValue, changes: Option<ChangeSet>) -> ChangeSet {
        self.view.remove_multi_in(self.name(), value, changes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{catalog, AttributeKind, MailMode, StartTlsMode};
    use crate::entry::EntryRef;
    use crate::store::memory::MemStore;

    fn mail1() -> EntryRef {
        EntryRef::server("mail1")
    }

    #[test]
    fn int_handle_uses_declared_default() {
        let store = MemStore::new();
        let view = AttributeView::new(&store, mail1());
        let port = IntAttr::new(&catalog::MAIL_PORT).on(&view);
        assert_eq!(port.get(), 80);
        assert_eq!(port.as_string().as_deref(), Some("80"));
        assert!(!port.is_set());
    }

    #[test]
    fn int_handle_without_default_is_minus_one() {
        let desc: &'static AttributeDescriptor = Box::leak(Box::new(AttributeDescriptor::new(
            "zimbraTest",
            1,
            AttributeKind::Int,
        )));
        let store = MemStore::new();
        let view = AttributeView::new(&store, mail1());
        assert_eq!(IntAttr::new(desc).on(&view).get(), -1);
    }

    #[test]
    fn bool_handle_round_trip() {
        let store = MemStore::new();
        let view = AttributeView::new(&store, mail1());
        let imap = BoolAttr::new(&catalog::IMAP_SERVER_ENABLED).on(&view);
        assert!(imap.get());
        imap.set(false).unwrap();
        assert!(!imap.get());
        assert_eq!(imap.as_string().as_deref(), Some("FALSE"));
        imap.unset().unwrap();
        assert!(imap.get());
    }

    #[test]
    fn duration_handle_exposes_millis_secs_and_raw() {
        let store = MemStore::new();
        let view = AttributeView::new(&store, mail1());
        let age = DurationAttr::new(&catalog::HSM_AGE).on(&view);
        assert_eq!(age.get(), 30 * 86_400_000);
        age.set("90s").unwrap();
        assert_eq!(age.get(), 90_000);
        assert_eq!(age.get_secs(), 90);
        assert_eq!(age.as_string().as_deref(), Some("90s"));
    }

    #[test]
    fn enum_handle_set_as_string_skips_validation() {
        let store = MemStore::new();
        let view = AttributeView::new(&store, mail1());
        let mode = EnumAttr::<MailMode>::new(&catalog::MAIL_MODE).on(&view);
        assert_eq!(mode.get(), None);
        mode.set(MailMode::Https).unwrap();
        assert_eq!(mode.get(), Some(MailMode::Https));
        mode.set_as_string("gopher").unwrap();
        assert_eq!(mode.get(), None);
        assert_eq!(mode.as_string().as_deref(), Some("gopher"));
    }

    #[test]
    fn enum_handle_falls_back_to_declared_token() {
        let store = MemStore::new();
        store.put_raw(&mail1(), "zimbraReverseProxyImapStartTlsMode", &["sometimes"]);
        let view = AttributeView::new(&store, mail1());
        let tls =
            EnumAttr::<StartTlsMode>::new(&catalog::REVERSE_PROXY_IMAP_START_TLS_MODE).on(&view);
        assert_eq!(tls.get(), Some(StartTlsMode::Only));
    }

    #[test]
    fn multi_handle_add_remove_and_default() {
        let store = MemStore::new();
        let view = AttributeView::new(&store, mail1());
        let smtp = MultiAttr::new(&catalog::SMTP_HOSTNAME).on(&view);
        assert_eq!(smtp.get(), vec!["localhost"]);
        smtp.add("mx1").unwrap();
        smtp.add("mx2").unwrap();
        assert_eq!(smtp.get(), vec!["mx1", "mx2"]);
        smtp.remove("mx1").unwrap();
        assert_eq!(smtp.get(), vec!["mx2"]);

        let services = MultiAttr::new(&catalog::SERVICE_ENABLED).on(&view);
        assert!(services.get().is_empty());
    }

    #[test]
    fn staged_handles_share_one_change_set() {
        let store = MemStore::new();
        let view = AttributeView::new(&store, mail1());
        let port = IntAttr::new(&catalog::MAIL_PORT).on(&view);
        let ssl = IntAttr::new(&catalog::MAIL_SSL_PORT).on(&view);
        let cs = port.set_in(8080, None);
        let cs = ssl.set_in(8443, Some(cs));
        assert_eq!(store.commit_count(), 0);
        view.commit(&cs).unwrap();
        assert_eq!(store.commit_count(), 1);
        assert_eq!(port.get(), 8080);
        assert_eq!(ssl.get(), 8443);
    }

    #[test]
    fn timestamp_handle_round_trip() {
        use chrono::TimeZone;
        let store = MemStore::new();
        let view = AttributeView::new(&store, mail1());
        let created = TimeAttr::new(&catalog::CREATE_TIMESTAMP).on(&view);
        assert_eq!(created.get(), None);
        let when = Utc.with_ymd_and_hms(2024, 1, 31, 12, 0, 0).unwrap();
        created.set(when).unwrap();
        assert_eq!(created.get(), Some(when));
        assert_eq!(created.as_string().as_deref(), Some("20240131120000Z"));
    }

    #[test]
    fn timestamp_handle_keeps_milliseconds() {
        use chrono::TimeZone;
        let store = MemStore::new();
        let view = AttributeView::new(&store, mail1());
        let created = TimeAttr::new(&catalog::CREATE_TIMESTAMP).on(&view);
        let when = Utc.with_ymd_and_hms(2024, 1, 31, 12, 0, 0).unwrap()
            + chrono::Duration::milliseconds(250);
        created.set(when).unwrap();
        assert_eq!(created.get(), Some(when));
        assert_eq!(created.as_string().as_deref(), Some("20240131120000.250Z"));
    }
}
