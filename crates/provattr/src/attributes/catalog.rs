//! Server attribute catalog.
//!
//! Names and ids follow the directory schema. Defaults are the stored form the
//! schema declares; attributes without one fall back to the kind's implicit
//! default (see [`AttrValue::implicit_default`](super::AttrValue::implicit_default)).

use super::descriptor::{AttributeDescriptor, AttributeKind};
use super::enums::{
    AttrEnum, BackupMode, ClusterType, MailMode, MailReferMode, MtaTlsSecurityLevel,
    ReverseProxyLogLevel, ReverseProxyMailMode, StartTlsMode, TableMaintenanceOperation,
};
use once_cell::sync::Lazy;
use std::collections::HashMap;

use AttributeKind::{Bool, Duration, Enum, Int, Long, String as Str, Timestamp};

const fn attr(name: &'static str, id: i32, kind: AttributeKind) -> AttributeDescriptor {
    AttributeDescriptor::new(name, id, kind)
}

// --- identity ---

pub static CN: AttributeDescriptor = attr("cn", -1, Str).describe("common name");
pub static DESCRIPTION: AttributeDescriptor =
    attr("description", -1, Str).describe("free-form description");
pub static CREATE_TIMESTAMP: AttributeDescriptor =
    attr("zimbraCreateTimestamp", 790, Timestamp).describe("time object was created");
pub static SERVICE_HOSTNAME: AttributeDescriptor = attr("zimbraServiceHostname", 65, Str)
    .describe("public hostname clients use to reach this server");
pub static ACE: AttributeDescriptor = attr("zimbraACE", 659, Str)
    .multi()
    .describe("access control entries");

// --- services ---

pub static SERVICE_ENABLED: AttributeDescriptor = attr("zimbraServiceEnabled", 220, Str)
    .multi()
    .describe("services enabled on this server");
pub static SERVICE_INSTALLED: AttributeDescriptor = attr("zimbraServiceInstalled", 221, Str)
    .multi()
    .describe("services installed on this server");
pub static CLUSTER_TYPE: AttributeDescriptor = attr("zimbraClusterType", 508, Enum)
    .values(ClusterType::TOKENS)
    .default("none")
    .describe("cluster software in use");
pub static BACKUP_MODE: AttributeDescriptor = attr("zimbraBackupMode", 512, Enum)
    .values(BackupMode::TOKENS)
    .default("Standard")
    .describe("backup scheduling mode");
pub static REDO_LOG_ENABLED: AttributeDescriptor = attr("zimbraRedoLogEnabled", 74, Bool)
    .default("TRUE")
    .describe("whether redo logging is enabled");
pub static TABLE_MAINTENANCE_OPERATION: AttributeDescriptor =
    attr("zimbraTableMaintenanceOperation", 170, Enum)
        .values(TableMaintenanceOperation::TOKENS)
        .default("ANALYZE")
        .describe("table maintenance operation to perform");

// --- admin and web ---

pub static ADMIN_PORT: AttributeDescriptor = attr("zimbraAdminPort", 155, Int)
    .default("7071")
    .describe("SSL port for admin UI");
pub static MAIL_PORT: AttributeDescriptor = attr("zimbraMailPort", 154, Int)
    .default("80")
    .describe("HTTP port for end-user UI");
pub static MAIL_SSL_PORT: AttributeDescriptor = attr("zimbraMailSSLPort", 166, Int)
    .default("443")
    .describe("SSL port for end-user UI");
pub static MAIL_MODE: AttributeDescriptor = attr("zimbraMailMode", 308, Enum)
    .values(MailMode::TOKENS)
    .describe("whether to run HTTP, HTTPS, both, mixed or redirect mode");
pub static MAIL_REFER_MODE: AttributeDescriptor = attr("zimbraMailReferMode", 613, Enum)
    .values(MailReferMode::TOKENS)
    .default("wronghost")
    .describe("when to send a refer tag in auth responses");
pub static HTTP_NUM_THREADS: AttributeDescriptor = attr("zimbraHttpNumThreads", 518, Int)
    .default("250")
    .describe("number of HTTP handler threads");
pub static FILE_UPLOAD_MAX_SIZE: AttributeDescriptor =
    attr("zimbraFileUploadMaxSize", 227, Long)
        .default("10485760")
        .describe("maximum size in bytes for file uploads");
pub static SOAP_REQUEST_MAX_SIZE: AttributeDescriptor =
    attr("zimbraSoapRequestMaxSize", 557, Int)
        .default("15360000")
        .describe("maximum size in bytes of a SOAP request");
pub static MESSAGE_CACHE_SIZE: AttributeDescriptor = attr("zimbraMessageCacheSize", 297, Int)
    .default("1671168")
    .describe("size of the parsed message cache in bytes");

// --- mailbox maintenance ---

pub static HSM_AGE: AttributeDescriptor = attr("zimbraHsmAge", 8, Duration)
    .default("30d")
    .describe("minimum age of items before they move to secondary storage");
pub static MAIL_PURGE_SLEEP_INTERVAL: AttributeDescriptor =
    attr("zimbraMailPurgeSleepInterval", 542, Duration)
        .default("1m")
        .describe("sleep time between mailbox purges");
pub static VIRUS_DEFINITIONS_UPDATE_FREQUENCY: AttributeDescriptor =
    attr("zimbraVirusDefinitionsUpdateFrequency", 191, Duration)
        .default("2h")
        .describe("how often virus definitions are refreshed");

// --- IMAP ---

pub static IMAP_SERVER_ENABLED: AttributeDescriptor =
    attr("zimbraImapServerEnabled", 176, Bool)
        .default("TRUE")
        .describe("whether the IMAP server is enabled");
pub static IMAP_CLEARTEXT_LOGIN_ENABLED: AttributeDescriptor =
    attr("zimbraImapCleartextLoginEnabled", 185, Bool)
        .default("FALSE")
        .describe("whether IMAP allows cleartext logins");
pub static IMAP_BIND_PORT: AttributeDescriptor = attr("zimbraImapBindPort", 180, Int)
    .default("143")
    .describe("port the IMAP server listens on");
pub static IMAP_SSL_BIND_PORT: AttributeDescriptor = attr("zimbraImapSSLBindPort", 183, Int)
    .default("993")
    .describe("port the IMAP SSL server listens on");
pub static IMAP_NUM_THREADS: AttributeDescriptor = attr("zimbraImapNumThreads", 181, Int)
    .default("200")
    .describe("number of IMAP handler threads");

// --- POP3 ---

pub static POP3_SERVER_ENABLED: AttributeDescriptor =
    attr("zimbraPop3ServerEnabled", 177, Bool)
        .default("TRUE")
        .describe("whether the POP3 server is enabled");
pub static POP3_BIND_PORT: AttributeDescriptor = attr("zimbraPop3BindPort", 94, Int)
    .default("110")
    .describe("port the POP3 server listens on");
pub static POP3_SSL_BIND_PORT: AttributeDescriptor = attr("zimbraPop3SSLBindPort", 187, Int)
    .default("995")
    .describe("port the POP3 SSL server listens on");
pub static POP3_NUM_THREADS: AttributeDescriptor = attr("zimbraPop3NumThreads", 96, Int)
    .default("100")
    .describe("number of POP3 handler threads");

// --- LMTP / SMTP / MTA ---

pub static LMTP_SERVER_ENABLED: AttributeDescriptor =
    attr("zimbraLmtpServerEnabled", 630, Bool)
        .default("TRUE")
        .describe("whether the LMTP server is enabled");
pub static LMTP_BIND_PORT: AttributeDescriptor = attr("zimbraLmtpBindPort", 24, Int)
    .default("7025")
    .describe("port the LMTP server listens on");
pub static LMTP_NUM_THREADS: AttributeDescriptor = attr("zimbraLmtpNumThreads", 26, Int)
    .default("20")
    .describe("number of LMTP handler threads");
pub static SMTP_HOSTNAME: AttributeDescriptor = attr("zimbraSmtpHostname", 97, Str)
    .multi()
    .default("localhost")
    .describe("SMTP hosts used to send mail");
pub static SMTP_PORT: AttributeDescriptor = attr("zimbraSmtpPort", 98, Int)
    .default("25")
    .describe("SMTP port used to send mail");
pub static SMTP_TIMEOUT: AttributeDescriptor = attr("zimbraSmtpTimeout", 99, Int)
    .default("60")
    .describe("SMTP timeout in seconds");
pub static MTA_AUTH_ENABLED: AttributeDescriptor = attr("zimbraMtaAuthEnabled", 194, Bool)
    .default("TRUE")
    .describe("whether the MTA requires authentication");
pub static MTA_TLS_SECURITY_LEVEL: AttributeDescriptor =
    attr("zimbraMtaTlsSecurityLevel", 795, Enum)
        .values(MtaTlsSecurityLevel::TOKENS)
        .default("may")
        .describe("TLS policy for outbound SMTP");

// --- reverse proxy ---

pub static REVERSE_PROXY_MAIL_MODE: AttributeDescriptor =
    attr("zimbraReverseProxyMailMode", 685, Enum)
        .values(ReverseProxyMailMode::TOKENS)
        .describe("HTTP mode of the reverse proxy");
pub static REVERSE_PROXY_LOG_LEVEL: AttributeDescriptor =
    attr("zimbraReverseProxyLogLevel", 723, Enum)
        .values(ReverseProxyLogLevel::TOKENS)
        .default("info")
        .describe("log level of the reverse proxy");
pub static REVERSE_PROXY_IMAP_START_TLS_MODE: AttributeDescriptor =
    attr("zimbraReverseProxyImapStartTlsMode", 641, Enum)
        .values(StartTlsMode::TOKENS)
        .default("only")
        .describe("STARTTLS policy of the IMAP proxy");
pub static REVERSE_PROXY_POP3_START_TLS_MODE: AttributeDescriptor =
    attr("zimbraReverseProxyPop3StartTlsMode", 642, Enum)
        .values(StartTlsMode::TOKENS)
        .default("only")
        .describe("STARTTLS policy of the POP3 proxy");
pub static REVERSE_PROXY_INACTIVITY_TIMEOUT: AttributeDescriptor =
    attr("zimbraReverseProxyInactivityTimeout", 735, Duration)
        .default("1h")
        .describe("idle time before the proxy drops a connection");
pub static REVERSE_PROXY_ROUTE_LOOKUP_TIMEOUT: AttributeDescriptor =
    attr("zimbraReverseProxyRouteLookupTimeout", 745, Duration)
        .default("15s")
        .describe("time allowed for a route lookup");
pub static REVERSE_PROXY_WORKER_PROCESSES: AttributeDescriptor =
    attr("zimbraReverseProxyWorkerProcesses", 724, Int)
        .default("4")
        .describe("number of proxy worker processes");
pub static REVERSE_PROXY_WORKER_CONNECTIONS: AttributeDescriptor =
    attr("zimbraReverseProxyWorkerConnections", 725, Int)
        .default("10240")
        .describe("connections per proxy worker process");

/// Every server attribute, in catalog order.
pub static SERVER_ATTRIBUTES: &[&AttributeDescriptor] = &[
    &CN,
    &DESCRIPTION,
    &CREATE_TIMESTAMP,
    &SERVICE_HOSTNAME,
    &ACE,
    &SERVICE_ENABLED,
    &SERVICE_INSTALLED,
    &CLUSTER_TYPE,
    &BACKUP_MODE,
    &REDO_LOG_ENABLED,
    &TABLE_MAINTENANCE_OPERATION,
    &ADMIN_PORT,
    &MAIL_PORT,
    &MAIL_SSL_PORT,
    &MAIL_MODE,
    &MAIL_REFER_MODE,
    &HTTP_NUM_THREADS,
    &FILE_UPLOAD_MAX_SIZE,
    &SOAP_REQUEST_MAX_SIZE,
    &MESSAGE_CACHE_SIZE,
    &HSM_AGE,
    &MAIL_PURGE_SLEEP_INTERVAL,
    &VIRUS_DEFINITIONS_UPDATE_FREQUENCY,
    &IMAP_SERVER_ENABLED,
    &IMAP_CLEARTEXT_LOGIN_ENABLED,
    &IMAP_BIND_PORT,
    &IMAP_SSL_BIND_PORT,
    &IMAP_NUM_THREADS,
    &POP3_SERVER_ENABLED,
    &POP3_BIND_PORT,
    &POP3_SSL_BIND_PORT,
    &POP3_NUM_THREADS,
    &LMTP_SERVER_ENABLED,
    &LMTP_BIND_PORT,
    &LMTP_NUM_THREADS,
    &SMTP_HOSTNAME,
    &SMTP_PORT,
    &SMTP_TIMEOUT,
    &MTA_AUTH_ENABLED,
    &MTA_TLS_SECURITY_LEVEL,
    &REVERSE_PROXY_MAIL_MODE,
    &REVERSE_PROXY_LOG_LEVEL,
    &REVERSE_PROXY_IMAP_START_TLS_MODE,
    &REVERSE_PROXY_POP3_START_TLS_MODE,
    &REVERSE_PROXY_INACTIVITY_TIMEOUT,
    &REVERSE_PROXY_ROUTE_LOOKUP_TIMEOUT,
    &REVERSE_PROXY_WORKER_PROCESSES,
    &REVERSE_PROXY_WORKER_CONNECTIONS,
];

/// Lowercased full and short names -> descriptor.
static INDEX: Lazy<HashMap<String, &'static AttributeDescriptor>> = Lazy::new(|| {
    let mut index = HashMap::new();
    for desc in SERVER_ATTRIBUTES.iter().copied() {
        index.insert(desc.name.to_ascii_lowercase(), desc);
        index
            .entry(desc.short_name().to_ascii_lowercase())
            .or_insert(desc);
    }
    index
});

/// Find a server attribute by name.
///
/// Accepts the full name (`zimbraMailPort`), the name without the vendor
/// prefix (`MailPort`), in any case. An exact match always wins.
pub fn lookup(name: &str) -> Option<&'static AttributeDescriptor> {
    if let Some(desc) = SERVER_ATTRIBUTES.iter().find(|d| d.name == name) {
        return Some(*desc);
    }
    INDEX.get(&name.to_ascii_lowercase()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique() {
        let names: HashSet<_> = SERVER_ATTRIBUTES.iter().map(|d| d.name).collect();
        assert_eq!(names.len(), SERVER_ATTRIBUTES.len());
    }

    #[test]
    fn lookup_by_full_short_and_any_case() {
        assert_eq!(lookup("zimbraMailPort").unwrap().id, 154);
        assert_eq!(lookup("MailPort").unwrap().id, 154);
        assert_eq!(lookup("mailport").unwrap().id, 154);
        assert_eq!(lookup("ZIMBRAMAILPORT").unwrap().id, 154);
        assert!(lookup("zimbraNoSuchThing").is_none());
    }

    #[test]
    fn non_prefixed_names_resolve() {
        assert_eq!(lookup("cn").unwrap().name, "cn");
        assert_eq!(lookup("description").unwrap().name, "description");
    }

    #[test]
    fn declared_defaults_satisfy_their_kind() {
        for desc in SERVER_ATTRIBUTES {
            if let Some(raw) = desc.default {
                assert!(
                    desc.validate(raw).is_ok(),
                    "{} has invalid default {:?}",
                    desc.name,
                    raw
                );
            }
        }
    }

    #[test]
    fn enum_descriptors_carry_tokens() {
        for desc in SERVER_ATTRIBUTES {
            assert_eq!(
                desc.kind == Enum,
                !desc.values.is_empty(),
                "{} token list does not match its kind",
                desc.name
            );
        }
    }

    #[test]
    fn multi_valued_attributes() {
        assert!(SMTP_HOSTNAME.multi);
        assert!(SERVICE_ENABLED.multi);
        assert!(!MAIL_PORT.multi);
    }
}
