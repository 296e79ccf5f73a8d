//! Built-in catalog entries, sorted by name within each list.

use crate::config::catalog::{CommandSpec, ConfigFileSpec, FileSpec, QuerySpec};

/// Linux commands
pub fn linux_commands() -> Vec<CommandSpec> {
    vec![
        CommandSpec::new("df", "system/diskspace.out", "df", &["-h"]),
        CommandSpec::new("dmesg", "system/dmesg.out", "dmesg", &[]),
        CommandSpec::new("dmesg-t", "system/dmesg_t.out", "dmesg", &["-T"]),
        CommandSpec::new("hostname", "system/hostname.out", "hostname", &["-f"]),
        CommandSpec::new("hypervisor", "system/hypervisor.out", "systemd-detect-virt", &[]),
        CommandSpec::new("ifconfig", "system/ifconfig.out", "ifconfig", &["-a"]),
        CommandSpec::new("interfaces", "system/interfaces.out", "ip", &["-o", "address"]),
        CommandSpec::new("iostat", "system/iostat.out", "iostat", &["-x", "1", "5"]),
        CommandSpec::new("ip-addr", "system/ip_addr.out", "ip", &["address", "list"]),
        CommandSpec::new("ipcs", "system/ipcs.out", "ipcs", &["-a"]),
        CommandSpec::new("locale", "system/locale.out", "locale", &[]),
        CommandSpec::new("locale-all", "system/locale_all.out", "locale", &["-a"]),
        CommandSpec::new("localectl", "system/localectl.out", "localectl", &["status"]),
        CommandSpec::new("lsblk", "system/lsblk.out", "lsblk", &[]),
        CommandSpec::new("lsdevmapper", "system/lsdevmapper.out", "ls", &["-la", "/dev/mapper"]),
        CommandSpec::new("lsmod", "system/lsmod.out", "lsmod", &[]),
        CommandSpec::new("lspci", "system/lspci.out", "lspci", &[]),
        CommandSpec::new("mount", "system/mount.out", "mount", &[]),
        CommandSpec::new("mpstat", "system/mpstat.out", "mpstat", &["-P", "ALL", "1", "5"]),
        CommandSpec::new("nfsiostat", "system/nfsiostat.out", "nfsiostat", &[]),
        CommandSpec::new("openssl-ciphers", "system/openssl/ciphers.out", "openssl", &["ciphers"]),
        CommandSpec::new(
            "openssl-crypto-policies-isapplied",
            "system/openssl/crypto-policies-isapplied.out",
            "update-crypto-policies",
            &["--is-applied"],
        ),
        CommandSpec::new(
            "openssl-crypto-policies-show",
            "system/openssl/crypto-policies-show.out",
            "update-crypto-policies",
            &["--show"],
        ),
        CommandSpec::new("openssl-engines", "system/openssl/engines.out", "openssl", &["engine"]),
        CommandSpec::new(
            "openssl-fips-mode-setup",
            "system/openssl/fips-mode-setup.out",
            "fips-mode-setup",
            &["--check"],
        ),
        CommandSpec::new("openssl-version", "system/openssl/version.out", "openssl", &["version", "-a"]),
        CommandSpec::new(
            "packages-apt-list-installed",
            "system/packages-apt-list-installed.out",
            "apt",
            &["list", "--installed", "*postgres*"],
        ),
        CommandSpec::new(
            "packages-dnf-list-installed",
            "system/packages-dnf-list-installed.out",
            "dnf",
            &["list", "installed", "*postgres*"],
        ),
        CommandSpec::new("packages-dpkg", "system/packages-dpkg.out", "dpkg", &["-l", "*postgres*"]),
        CommandSpec::new("packages-rpm", "system/packages-rpm.out", "rpm", &["-qa", "*postgres*"]),
        CommandSpec::new(
            "packages-yum-list-installed",
            "system/packages-yum-list-installed.out",
            "yum",
            &["list", "installed", "*postgres*"],
        ),
        CommandSpec::new("ps", "system/ps.out", "ps", &["auxww"]),
        CommandSpec::new("sar", "system/sar.out", "sar", &["-A"]),
        CommandSpec::new("sestatus", "system/sestatus.out", "sestatus", &[]),
        CommandSpec::new(
            "systemctl-list-units",
            "system/systemd/list-units.out",
            "systemctl",
            &["list-units", "--all"],
        ),
        CommandSpec::new("top", "system/top.out", "top", &["-b", "-c", "-w", "512", "-n", "1"]),
        CommandSpec::new("tuned-active", "system/tuned/tuned-active.out", "tuned-adm", &["active"]),
        CommandSpec::new("tuned-list", "system/tuned/tuned-list.out", "tuned-adm", &["list"]),
        CommandSpec::new("uname", "system/uname.out", "uname", &["-a"]),
        CommandSpec::new("vmstat-command", "system/vmstat-command.out", "vmstat", &["1", "10"]),
        CommandSpec::new(
            "cpu_scaling_available_governors",
            "system/sys/cpu_scaling_available_governors.out",
            "sh",
            &["-c", "cat /sys/devices/system/cpu/cpu*/cpufreq/scaling_available_governors 2>/dev/null | sort -u"],
        ),
        CommandSpec::new(
            "cpu_scaling_driver",
            "system/sys/cpu_scaling_driver.out",
            "sh",
            &["-c", "cat /sys/devices/system/cpu/cpu*/cpufreq/scaling_driver 2>/dev/null | sort -u"],
        ),
        CommandSpec::new(
            "cpu_scaling_governor",
            "system/sys/cpu_scaling_governor.out",
            "sh",
            &["-c", "cat /sys/devices/system/cpu/cpu*/cpufreq/scaling_governor 2>/dev/null | sort -u"],
        ),
        CommandSpec::new(
            "energy_perf_bias",
            "system/sys/energy_perf_bias.out",
            "sh",
            &["-c", "cat /sys/devices/system/cpu/cpu*/power/energy_perf_bias 2>/dev/null | sort -u"],
        ),
        CommandSpec::new(
            "intel_pstate",
            "system/sys/intel_pstate.out",
            "sh",
            &["-c", "cat /sys/devices/system/cpu/intel_pstate/* 2>/dev/null"],
        ),
        CommandSpec::new(
            "io-schedulers",
            "system/io_schedulers.out",
            "sh",
            &[
                "-c",
                "for f in /sys/block/*/queue/scheduler; do [ -f \"$f\" ] && echo \"$(basename $(dirname $(dirname $f))): $(cat $f)\"; done",
            ],
        ),
        CommandSpec::new(
            "read_ahead",
            "system/read_ahead.out",
            "sh",
            &["-c", "blockdev --getra /dev/sd* /dev/nvme* 2>/dev/null"],
        ),
        CommandSpec::new("sysctl", "system/sysctl.out", "sysctl", &["-a"]),
        CommandSpec::new(
            "transparent_hugepage",
            "system/sys/kernel_mm_transparent_hugepage.out",
            "sh",
            &["-c", "grep -r . /sys/kernel/mm/transparent_hugepage/ 2>/dev/null"],
        ),
    ]
}

/// Linux files
pub fn linux_files() -> Vec<FileSpec> {
    vec![
        FileSpec::new("cpuinfo", "system/proc/cpuinfo.out", "/proc/cpuinfo"),
        FileSpec::new("fstab", "system/fstab.out", "/etc/fstab"),
        FileSpec::new("hosts", "system/hosts.out", "/etc/hosts"),
        FileSpec::new("limits", "system/limits.out", "/etc/security/limits.conf"),
        FileSpec::new("locale-conf", "system/locale_conf.out", "/etc/locale.conf"),
        FileSpec::new("machine-id", "system/machine_id.out", "/etc/machine-id"),
        FileSpec::new("meminfo", "system/proc/meminfo.out", "/proc/meminfo"),
        FileSpec::new("os-release", "system/os_release.out", "/etc/os-release"),
        FileSpec::new("pressure-cpu", "system/proc/pressure_cpu.out", "/proc/pressure/cpu"),
        FileSpec::new("pressure-io", "system/proc/pressure_io.out", "/proc/pressure/io"),
        FileSpec::new("pressure-memory", "system/proc/pressure_memory.out", "/proc/pressure/memory"),
        FileSpec::new("proc-loadavg", "system/proc/loadavg.out", "/proc/loadavg"),
        FileSpec::new("proc-mounts", "system/proc/mounts.out", "/proc/mounts"),
        FileSpec::new("proc-uptime", "system/proc/uptime.out", "/proc/uptime"),
        FileSpec::new("proc-vmstat", "system/proc/vmstat.out", "/proc/vmstat"),
        FileSpec::new("swaps", "system/proc/swaps.out", "/proc/swaps"),
        FileSpec::new("system-release", "system/system_release.out", "/etc/system-release"),
    ]
}

/// macOS commands
pub fn macos_commands() -> Vec<CommandSpec> {
    vec![
        CommandSpec::new("brew-list", "system/packages_brew.out", "brew", &["list", "--versions"]),
        CommandSpec::new(
            "brew-postgres",
            "system/packages_brew_postgres.out",
            "sh",
            &["-c", "brew list --versions | grep -i postgres"],
        ),
        CommandSpec::new(
            "diskutil-info-all",
            "system/diskutil_info_all.out",
            "sh",
            &["-c", "diskutil list | grep -o '/dev/disk[0-9]*' | xargs -n1 diskutil info"],
        ),
        CommandSpec::new("diskutil-list", "system/diskutil_list.out", "diskutil", &["list"]),
        CommandSpec::new("hostname", "system/hostname.out", "hostname", &[]),
        CommandSpec::new(
            "hypervisor-check",
            "system/hypervisor.out",
            "sh",
            &["-c", "sysctl kern.hv_vmm_present machdep.cpu.features | grep -i 'hypervisor\\|vmx\\|svm'"],
        ),
        CommandSpec::new("ifconfig", "system/ifconfig.out", "ifconfig", &["-a"]),
        CommandSpec::new("iostat", "system/iostat.out", "iostat", &["-c", "5", "-w", "1"]),
        CommandSpec::new("ipcs", "system/ipcs.out", "ipcs", &["-a"]),
        CommandSpec::new("kextstat", "system/kextstat.out", "kextstat", &[]),
        CommandSpec::new("launchctl-list", "system/launchctl_list.out", "launchctl", &["list"]),
        CommandSpec::new("memory-pressure", "system/memory_pressure.out", "memory_pressure", &[]),
        CommandSpec::new("netstat-interfaces", "system/netstat_interfaces.out", "netstat", &["-i"]),
        CommandSpec::new("netstat-routing", "system/netstat_routing.out", "netstat", &["-r"]),
        CommandSpec::new("netstat-stats", "system/netstat_stats.out", "netstat", &["-s"]),
        CommandSpec::new("pmset-assertions", "system/pmset_assertions.out", "pmset", &["-g", "assertions"]),
        CommandSpec::new("pmset-settings", "system/pmset_settings.out", "pmset", &["-g"]),
        CommandSpec::new("sysctl-cpu", "system/sysctl_cpu.out", "sysctl", &["-a", "machdep.cpu"]),
        CommandSpec::new("sysctl-hw", "system/sysctl_hw.out", "sysctl", &["-a", "hw"]),
        CommandSpec::new("sysctl-kern", "system/sysctl_kern.out", "sysctl", &["-a", "kern"]),
        CommandSpec::new("sysctl-vm", "system/sysctl_vm.out", "sysctl", &["-a", "vm"]),
        CommandSpec::new(
            "system-log-boot",
            "system/system_log_boot.out",
            "log",
            &["show", "--predicate", "processID == 0", "--last", "boot", "--style", "syslog"],
        ),
        CommandSpec::new(
            "system-profiler-hardware",
            "system/system_profiler_hardware.out",
            "system_profiler",
            &["SPHardwareDataType"],
        ),
        CommandSpec::new(
            "system-profiler-network",
            "system/system_profiler_network.out",
            "system_profiler",
            &["SPNetworkDataType"],
        ),
        CommandSpec::new(
            "system-profiler-pci",
            "system/system_profiler_pci.out",
            "system_profiler",
            &["SPPCIDataType"],
        ),
        CommandSpec::new(
            "system-profiler-software",
            "system/system_profiler_software.out",
            "system_profiler",
            &["SPSoftwareDataType"],
        ),
        CommandSpec::new(
            "system-profiler-storage",
            "system/system_profiler_storage.out",
            "system_profiler",
            &["SPStorageDataType"],
        ),
        CommandSpec::new("top", "system/top.out", "top", &["-l", "1"]),
        CommandSpec::new("ulimit", "system/ulimit.out", "sh", &["-c", "ulimit -a"]),
        CommandSpec::new("vm-stat", "system/vm_stat.out", "vm_stat", &[]),
        CommandSpec::new("vm-stat-interval", "system/vm_stat_interval.out", "vm_stat", &["-c", "10", "1"]),
    ]
}

/// macOS files
pub fn macos_files() -> Vec<FileSpec> {
    vec![
        FileSpec::new("sysctl-conf", "system/sysctl.conf", "/etc/sysctl.conf"),
        FileSpec::new(
            "system-version",
            "system/system_version.plist",
            "/System/Library/CoreServices/SystemVersion.plist",
        ),
    ]
}

/// Commands available on every supported platform
pub fn shared_commands() -> Vec<CommandSpec> {
    vec![
        CommandSpec::new("df", "system/diskspace.out", "df", &["-h"]),
        CommandSpec::new("dmesg", "system/dmesg.out", "dmesg", &[]),
        CommandSpec::new("locale", "system/locale.out", "locale", &[]),
        CommandSpec::new("locale-all", "system/locale_all.out", "locale", &["-a"]),
        CommandSpec::new("mount", "system/mount.out", "mount", &[]),
        CommandSpec::new("openssl-ciphers", "system/openssl/ciphers.out", "openssl", &["ciphers"]),
        CommandSpec::new("openssl-engines", "system/openssl/engines.out", "openssl", &["engine"]),
        CommandSpec::new("openssl-version", "system/openssl/version.out", "openssl", &["version", "-a"]),
        CommandSpec::new("ps", "system/ps.out", "ps", &["auxww"]),
        CommandSpec::new("uname", "system/uname.out", "uname", &["-a"]),
        CommandSpec::new("sysctl", "system/sysctl.out", "sysctl", &["-a"]),
    ]
}

/// Files available on every supported platform
pub fn shared_files() -> Vec<FileSpec> {
    vec![FileSpec::new("hosts", "system/hosts.out", "/etc/hosts")]
}

const BLOCKING_LOCKS_SQL: &str = "
SELECT blocked_locks.pid AS blocked_pid,
       blocked_activity.usename AS blocked_user,
       blocking_locks.pid AS blocking_pid,
       blocking_activity.usename AS blocking_user,
       blocked_activity.query AS blocked_statement,
       blocking_activity.query AS current_statement_in_blocking_process
FROM pg_catalog.pg_locks blocked_locks
JOIN pg_catalog.pg_stat_activity blocked_activity ON blocked_activity.pid = blocked_locks.pid
JOIN pg_catalog.pg_locks blocking_locks
    ON blocking_locks.locktype = blocked_locks.locktype
    AND blocking_locks.database IS NOT DISTINCT FROM blocked_locks.database
    AND blocking_locks.relation IS NOT DISTINCT FROM blocked_locks.relation
    AND blocking_locks.page IS NOT DISTINCT FROM blocked_locks.page
    AND blocking_locks.tuple IS NOT DISTINCT FROM blocked_locks.tuple
    AND blocking_locks.virtualxid IS NOT DISTINCT FROM blocked_locks.virtualxid
    AND blocking_locks.transactionid IS NOT DISTINCT FROM blocked_locks.transactionid
    AND blocking_locks.classid IS NOT DISTINCT FROM blocked_locks.classid
    AND blocking_locks.objid IS NOT DISTINCT FROM blocked_locks.objid
    AND blocking_locks.objsubid IS NOT DISTINCT FROM blocked_locks.objsubid
    AND blocking_locks.pid != blocked_locks.pid
JOIN pg_catalog.pg_stat_activity blocking_activity ON blocking_activity.pid = blocking_locks.pid
WHERE NOT blocked_locks.granted";

const ACTIVITY_MAXAGE_SQL: &str = "
SELECT
    max(clock_timestamp() - query_start) AS max_query_age,
    max(clock_timestamp() - xact_start) AS max_xact_age,
    max(clock_timestamp() - backend_start) AS max_backend_age
FROM pg_stat_activity
WHERE state != 'idle'";

/// Instance-level queries, run once on the default database
pub fn postgres_queries() -> Vec<QuerySpec> {
    vec![
        QuerySpec::new("activity", "postgresql/running_activity.tsv", "SELECT * FROM pg_stat_activity ORDER BY pid"),
        QuerySpec::new("archiver", "postgresql/archiver.tsv", "SELECT * FROM pg_stat_archiver"),
        QuerySpec::new(
            "available_extensions",
            "postgresql/available_extensions.tsv",
            "SELECT * FROM pg_available_extensions ORDER BY name",
        ),
        QuerySpec::new("bgwriter", "postgresql/bgwriter.tsv", "SELECT * FROM pg_stat_bgwriter"),
        QuerySpec::new("blocking_locks", "postgresql/blocking_locks.tsv", BLOCKING_LOCKS_SQL),
        QuerySpec::new("checkpointer", "postgresql/checkpointer.tsv", "SELECT * FROM pg_stat_checkpointer"),
        QuerySpec::new(
            "configuration",
            "postgresql/configuration.tsv",
            "SELECT name, setting, unit, category, short_desc FROM pg_settings ORDER BY category, name",
        ),
        QuerySpec::new(
            "databases",
            "postgresql/databases.tsv",
            "SELECT oid, datname, datdba, encoding, datcollate, datctype FROM pg_database ORDER BY datname",
        ),
        QuerySpec::new(
            "databases_blk",
            "postgresql/databases_blk.tsv",
            "SELECT datname, blks_read, blks_hit, blk_read_time, blk_write_time FROM pg_stat_database WHERE datname IS NOT NULL ORDER BY datname",
        ),
        QuerySpec::new(
            "databases_checksums",
            "postgresql/databases_checksums.tsv",
            "SELECT datname, checksum_failures, checksum_last_failure FROM pg_stat_database WHERE datname IS NOT NULL ORDER BY datname",
        ),
        QuerySpec::new(
            "databases_tup",
            "postgresql/databases_tup.tsv",
            "SELECT datname, tup_returned, tup_fetched, tup_inserted, tup_updated, tup_deleted FROM pg_stat_database WHERE datname IS NOT NULL ORDER BY datname",
        ),
        QuerySpec::new(
            "databases_xact",
            "postgresql/databases_xact.tsv",
            "SELECT datname, xact_commit, xact_rollback FROM pg_stat_database WHERE datname IS NOT NULL ORDER BY datname",
        ),
        QuerySpec::new(
            "db_role_setting",
            "postgresql/db_role_setting.tsv",
            "SELECT setdatabase, setrole, setconfig FROM pg_db_role_setting",
        ),
        QuerySpec::new(
            "pg_hba_file_rules",
            "postgresql/pg_hba_file_rules.tsv",
            "SELECT * FROM pg_hba_file_rules ORDER BY line_number",
        ),
        QuerySpec::new(
            "postmaster_start_time",
            "postgresql/postmaster_start_time.tsv",
            "SELECT pg_postmaster_start_time() AS start_time",
        ),
        QuerySpec::new(
            "prepared_xacts",
            "postgresql/prepared_xacts.tsv",
            "SELECT * FROM pg_prepared_xacts ORDER BY prepared",
        ),
        QuerySpec::new("replication", "postgresql/replication.tsv", "SELECT * FROM pg_stat_replication"),
        QuerySpec::new(
            "replication_origin",
            "postgresql/replication_origin.tsv",
            "SELECT * FROM pg_replication_origin_status",
        ),
        QuerySpec::new(
            "replication_slots",
            "postgresql/replication_slots.tsv",
            "SELECT * FROM pg_replication_slots ORDER BY slot_name",
        ),
        QuerySpec::new("roles", "postgresql/roles.tsv", "SELECT * FROM pg_roles ORDER BY rolname"),
        QuerySpec::new(
            "running_activity_maxage",
            "postgresql/running_activity_maxage.tsv",
            ACTIVITY_MAXAGE_SQL,
        ),
        QuerySpec::new(
            "running_locks",
            "postgresql/running_locks.tsv",
            "SELECT * FROM pg_locks WHERE granted ORDER BY pid, locktype",
        ),
        QuerySpec::new(
            "stat_io",
            "postgresql/stat_io.tsv",
            "SELECT * FROM pg_stat_io ORDER BY backend_type, context, object",
        ),
        QuerySpec::new(
            "stat_progress_analyze",
            "postgresql/stat_progress_analyze.tsv",
            "SELECT * FROM pg_stat_progress_analyze",
        ),
        QuerySpec::new(
            "stat_progress_basebackup",
            "postgresql/stat_progress_basebackup.tsv",
            "SELECT * FROM pg_stat_progress_basebackup",
        ),
        QuerySpec::new(
            "stat_progress_copy",
            "postgresql/stat_progress_copy.tsv",
            "SELECT * FROM pg_stat_progress_copy",
        ),
        QuerySpec::new(
            "stat_progress_vacuum",
            "postgresql/stat_progress_vacuum.tsv",
            "SELECT * FROM pg_stat_progress_vacuum",
        ),
        QuerySpec::new("stat_slru", "postgresql/stat_slru.tsv", "SELECT * FROM pg_stat_slru ORDER BY name"),
        QuerySpec::new("stat_wal", "postgresql/stat_wal.tsv", "SELECT * FROM pg_stat_wal"),
        QuerySpec::new(
            "subscriptions",
            "postgresql/subscriptions.tsv",
            "SELECT * FROM pg_subscription ORDER BY subname",
        ),
        QuerySpec::new(
            "tablespaces",
            "postgresql/tablespaces.tsv",
            "SELECT oid, spcname, spcowner, spcacl, spcoptions, pg_tablespace_location(oid) as spclocation FROM pg_tablespace ORDER BY spcname",
        ),
        QuerySpec::new("version", "postgresql/version.tsv", "SELECT version()"),
        QuerySpec::new(
            "waits_sample",
            "postgresql/waits_sample.tsv",
            "SELECT pid, wait_event_type, wait_event, state, query FROM pg_stat_activity WHERE wait_event IS NOT NULL ORDER BY pid",
        ),
    ]
}

/// Files read from the server's data directory
pub fn postgres_config_files() -> Vec<ConfigFileSpec> {
    [
        "pg_hba.conf",
        "pg_ident.conf",
        "postgresql.auto.conf",
        "postgresql.conf",
        "recovery.conf",
        "recovery.done",
    ]
    .iter()
    .map(|filename| ConfigFileSpec::new(filename))
    .collect()
}

/// Queries run against every connectable database
pub fn database_queries() -> Vec<QuerySpec> {
    vec![
        QuerySpec::new(
            "extensions",
            "databases/{database}/extensions.tsv",
            "SELECT * FROM pg_extension ORDER BY extname",
        ),
        QuerySpec::new(
            "funcs",
            "databases/{database}/funcs.tsv",
            "SELECT oid, proname, pronamespace, proowner, prolang, prokind FROM pg_proc WHERE prokind = 'f' ORDER BY proname",
        ),
        QuerySpec::new(
            "indexes",
            "databases/{database}/indexes.tsv",
            "SELECT schemaname, tablename, indexname, indexdef FROM pg_indexes ORDER BY schemaname, tablename, indexname",
        ),
        QuerySpec::new(
            "languages",
            "databases/{database}/languages.tsv",
            "SELECT * FROM pg_language ORDER BY lanname",
        ),
        QuerySpec::new(
            "operators",
            "databases/{database}/operators.tsv",
            "SELECT oid, oprname, oprkind, oprcanmerge, oprcanhash FROM pg_operator ORDER BY oprname",
        ),
        QuerySpec::new(
            "partitioned_tables",
            "databases/{database}/partitioned_tables.tsv",
            "SELECT * FROM pg_partitioned_table ORDER BY partrelid",
        ),
        QuerySpec::new(
            "partitions",
            "databases/{database}/partitions.tsv",
            "SELECT inhrelid::regclass AS partition, inhparent::regclass AS parent, inhseqno FROM pg_inherits ORDER BY inhparent, inhseqno",
        ),
        QuerySpec::new(
            "procs",
            "databases/{database}/procs.tsv",
            "SELECT oid, proname, pronamespace, proowner, prolang, prokind FROM pg_proc WHERE prokind = 'p' ORDER BY proname",
        ),
        QuerySpec::new(
            "publication_tables",
            "databases/{database}/publication_tables.tsv",
            "SELECT * FROM pg_publication_tables ORDER BY pubname, schemaname, tablename",
        ),
        QuerySpec::new(
            "publications",
            "databases/{database}/publications.tsv",
            "SELECT * FROM pg_publication ORDER BY pubname",
        ),
        QuerySpec::new(
            "schemas",
            "databases/{database}/schemas.tsv",
            "SELECT * FROM pg_namespace ORDER BY nspname",
        ),
        QuerySpec::new(
            "stat_database",
            "databases/{database}/stat_database.tsv",
            "SELECT datname, conflicts, deadlocks, temp_files, temp_bytes, stats_reset FROM pg_stat_database WHERE datname = current_database()",
        ),
        QuerySpec::new(
            "statistics",
            "databases/{database}/statistics.tsv",
            "SELECT * FROM pg_statistic_ext ORDER BY stxname",
        ),
        QuerySpec::new(
            "subscription_tables",
            "databases/{database}/subscription_tables.tsv",
            "SELECT * FROM pg_subscription_rel ORDER BY srsubid, srrelid",
        ),
        QuerySpec::new(
            "tables",
            "databases/{database}/tables.tsv",
            "SELECT schemaname, tablename, tableowner, tablespace, hasindexes, hasrules, hastriggers FROM pg_tables ORDER BY schemaname, tablename",
        ),
        QuerySpec::new(
            "triggers",
            "databases/{database}/triggers.tsv",
            "SELECT * FROM pg_trigger ORDER BY tgname",
        ),
        QuerySpec::new(
            "types",
            "databases/{database}/types.tsv",
            "SELECT oid, typname, typnamespace, typtype, typcategory FROM pg_type ORDER BY typname",
        ),
    ]
}

/// pg_statviz snapshot tables, collected per database where the extension exists
pub fn pg_statviz_queries() -> Vec<QuerySpec> {
    [
        "buf", "conf", "conn", "db", "io", "lock", "repl", "slru", "snapshots", "wait", "wal",
    ]
    .iter()
    .map(|table| {
        QuerySpec::new(
            &format!("pg_statviz_{}", table),
            &format!("pg_statviz/{{database}}/{}.tsv", table),
            &format!("SELECT * FROM pgstatviz.{} ORDER BY snapshot_tstamp", table),
        )
    })
    .collect()
}
