//! Named accessors for server entries.
//!
//! ```
//! use provattr::{MemStore, Server};
//!
//! let store = MemStore::new();
//! let server = Server::new(&store, "mail1.example.com");
//!
//! assert_eq!(server.mail_port().get(), 80);
//! server.mail_port().set(8080).unwrap();
//! assert_eq!(server.mail_port().get(), 8080);
//! server.mail_port().unset().unwrap();
//! assert_eq!(server.mail_port().get(), 80);
//! ```

use crate::attributes::catalog;
use crate::attributes::{
    BackupMode, BoolAttr, Bound, ClusterType, DurationAttr, EnumAttr, IntAttr, LongAttr, MailMode,
    MailReferMode, MtaTlsSecurityLevel, MultiAttr, ReverseProxyLogLevel, ReverseProxyMailMode,
    StartTlsMode, StrAttr, TableMaintenanceOperation, TimeAttr,
};
use crate::changes::ChangeSet;
use crate::entry::{EntryKind, EntryRef};
use crate::error::Result;
use crate::store::AttributeStore;
use crate::view::AttributeView;

/// A server entry with one accessor method per catalog attribute.
pub struct Server<'s, S: AttributeStore + ?Sized> {
    view: AttributeView<'s, S>,
}

impl<'s, S: AttributeStore + ?Sized> Server<'s, S> {
    pub fn new(store: &'s S, name: impl Into<String>) -> Self {
        Self {
            view: AttributeView::new(store, EntryRef::server(name)),
        }
    }

    /// Wrap an existing view. Returns `None` unless it is bound to a server.
    pub fn from_view(view: AttributeView<'s, S>) -> Option<Self> {
        (view.entry().kind == EntryKind::Server).then_some(Self { view })
    }

    pub fn name(&self) -> &str {
        &self.view.entry().name
    }

    pub fn view(&self) -> &AttributeView<'s, S> {
        &self.view
    }

    /// Commit a change set built from the staged (`*_in`) accessors.
    pub fn commit(&self, changes: &ChangeSet) -> Result<()> {
        self.view.commit(changes)
    }
}

macro_rules! server_attributes {
    ($($(#[$meta:meta])* $method:ident: $handle:ty = $desc:ident;)+) => {
        impl<'s, S: AttributeStore + ?Sized> Server<'s, S> {
            $(
                $(#[$meta])*
                pub fn $method(&self) -> Bound<'_, 's, S, $handle> {
                    <$handle>::new(&catalog::$desc).on(&self.view)
                }
            )+
        }
    };
}

server_attributes! {
    cn: StrAttr = CN;
    description: StrAttr = DESCRIPTION;
    create_timestamp: TimeAttr = CREATE_TIMESTAMP;
    service_hostname: StrAttr = SERVICE_HOSTNAME;
    /// Access control entries.
    ace: MultiAttr = ACE;

    service_enabled: MultiAttr = SERVICE_ENABLED;
    service_installed: MultiAttr = SERVICE_INSTALLED;
    cluster_type: EnumAttr<ClusterType> = CLUSTER_TYPE;
    backup_mode: EnumAttr<BackupMode> = BACKUP_MODE;
    redo_log_enabled: BoolAttr = REDO_LOG_ENABLED;
    table_maintenance_operation: EnumAttr<TableMaintenanceOperation> = TABLE_MAINTENANCE_OPERATION;

    admin_port: IntAttr = ADMIN_PORT;
    /// HTTP port for end-user UI. Defaults to 80.
    mail_port: IntAttr = MAIL_PORT;
    mail_ssl_port: IntAttr = MAIL_SSL_PORT;
    mail_mode: EnumAttr<MailMode> = MAIL_MODE;
    mail_refer_mode: EnumAttr<MailReferMode> = MAIL_REFER_MODE;
    http_num_threads: IntAttr = HTTP_NUM_THREADS;
    file_upload_max_size: LongAttr = FILE_UPLOAD_MAX_SIZE;
    soap_request_max_size: IntAttr = SOAP_REQUEST_MAX_SIZE;
    message_cache_size: IntAttr = MESSAGE_CACHE_SIZE;

    hsm_age: DurationAttr = HSM_AGE;
    mail_purge_sleep_interval: DurationAttr = MAIL_PURGE_SLEEP_INTERVAL;
    virus_definitions_update_frequency: DurationAttr = VIRUS_DEFINITIONS_UPDATE_FREQUENCY;

    imap_server_enabled: BoolAttr = IMAP_SERVER_ENABLED;
    imap_cleartext_login_enabled: BoolAttr = IMAP_CLEARTEXT_LOGIN_ENABLED;
    imap_bind_port: IntAttr = IMAP_BIND_PORT;
    imap_ssl_bind_port: IntAttr = IMAP_SSL_BIND_PORT;
    imap_num_threads: IntAttr = IMAP_NUM_THREADS;

    pop3_server_enabled: BoolAttr = POP3_SERVER_ENABLED;
    pop3_bind_port: IntAttr = POP3_BIND_PORT;
    pop3_ssl_bind_port: IntAttr = POP3_SSL_BIND_PORT;
    pop3_num_threads: IntAttr = POP3_NUM_THREADS;

    lmtp_server_enabled: BoolAttr = LMTP_SERVER_ENABLED;
    lmtp_bind_port: IntAttr = LMTP_BIND_PORT;
    lmtp_num_threads: IntAttr = LMTP_NUM_THREADS;
    smtp_hostname: MultiAttr = SMTP_HOSTNAME;
    smtp_port: IntAttr = SMTP_PORT;
    /// Seconds.
    smtp_timeout: IntAttr = SMTP_TIMEOUT;
    mta_auth_enabled: BoolAttr = MTA_AUTH_ENABLED;
    mta_tls_security_level: EnumAttr<MtaTlsSecurityLevel> = MTA_TLS_SECURITY_LEVEL;

    reverse_proxy_mail_mode: EnumAttr<ReverseProxyMailMode> = REVERSE_PROXY_MAIL_MODE;
    reverse_proxy_log_level: EnumAttr<ReverseProxyLogLevel> = REVERSE_PROXY_LOG_LEVEL;
    reverse_proxy_imap_start_tls_mode: EnumAttr<StartTlsMode> = REVERSE_PROXY_IMAP_START_TLS_MODE;
    reverse_proxy_pop3_start_tls_mode: EnumAttr<StartTlsMode> = REVERSE_PROXY_POP3_START_TLS_MODE;
    reverse_proxy_inactivity_timeout: DurationAttr = REVERSE_PROXY_INACTIVITY_TIMEOUT;
    reverse_proxy_route_lookup_timeout: DurationAttr = REVERSE_PROXY_ROUTE_LOOKUP_TIMEOUT;
    reverse_proxy_worker_processes: IntAttr = REVERSE_PROXY_WORKER_PROCESSES;
    reverse_proxy_worker_connections: IntAttr = REVERSE_PROXY_WORKER_CONNECTIONS;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProvError;
    use crate::store::memory::MemStore;
    use crate::test_utils::TestEnv;

    #[test]
    fn mail_port_scenario() {
        let store = MemStore::new();
        let server = Server::new(&store, "mail1");
        assert_eq!(server.mail_port().get(), 80);

        server.mail_port().set(8080).unwrap();
        assert_eq!(server.mail_port().get(), 8080);
        assert_eq!(server.mail_port().as_string().as_deref(), Some("8080"));

        server.mail_port().unset().unwrap();
        assert_eq!(server.mail_port().get(), 80);
    }

    #[test]
    fn batch_across_attributes_commits_once() {
        let store = MemStore::new();
        let server = Server::new(&store, "mail1");
        let cs = server.mail_port().set_in(8080, None);
        let cs = server.mail_mode().set_in(MailMode::Both, Some(cs));
        let cs = server.smtp_hostname().add_in("mx1", Some(cs));
        let cs = server.hsm_age().unset_in(Some(cs));
        server.commit(&cs).unwrap();

        assert_eq!(store.commit_count(), 1);
        assert_eq!(server.mail_port().get(), 8080);
        assert_eq!(server.mail_mode().get(), Some(MailMode::Both));
        assert_eq!(server.smtp_hostname().get(), vec!["mx1"]);
    }

    #[test]
    fn long_and_duration_accessors() {
        let store = MemStore::new();
        let server = Server::new(&store, "mail1");
        assert_eq!(server.file_upload_max_size().get(), 10_485_760);
        server.file_upload_max_size().set(20_971_520i64).unwrap();
        assert_eq!(server.file_upload_max_size().get(), 20_971_520);

        assert_eq!(server.reverse_proxy_route_lookup_timeout().get(), 15_000);
        assert_eq!(server.reverse_proxy_route_lookup_timeout().get_secs(), 15);
    }

    #[test]
    fn unknown_enum_token_reads_declared_default() {
        let store = MemStore::new();
        store.put_raw(&EntryRef::server("mail1"), "zimbraReverseProxyLogLevel", &["loud"]);
        let server = Server::new(&store, "mail1");
        assert_eq!(
            server.reverse_proxy_log_level().get(),
            Some(ReverseProxyLogLevel::Info)
        );
    }

    #[test]
    fn direct_setter_surfaces_commit_failure() {
        let store = MemStore::new();
        store.set_simulate_commit_error(true);
        let server = Server::new(&store, "mail1");
        assert!(matches!(
            server.imap_server_enabled().set(false),
            Err(ProvError::Commit(_))
        ));
        assert!(server.imap_server_enabled().get());
    }

    #[test]
    fn from_view_requires_server_entry() {
        let store = MemStore::new();
        let domain = AttributeView::new(&store, EntryRef::new(EntryKind::Domain, "example.com"));
        assert!(Server::from_view(domain).is_none());
        let server = AttributeView::new(&store, EntryRef::server("mail1"));
        assert_eq!(Server::from_view(server).unwrap().name(), "mail1");
    }

    #[test]
    fn file_backed_batch_survives_reopen() {
        let env = TestEnv::new();
        let server = env.server("mail1");
        let cs = server.pop3_bind_port().set_in(1110, None);
        let cs = server.service_enabled().set_in(&["pop3", "imap"], Some(cs));
        server.commit(&cs).unwrap();

        let reopened = env.server("mail1");
        assert_eq!(reopened.pop3_bind_port().get(), 1110);
        assert_eq!(reopened.service_enabled().get(), vec!["pop3", "imap"]);
        assert!(env.entry_file(&EntryRef::server("mail1")).exists());
    }
}
