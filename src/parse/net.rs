//! Parsers for `/proc/net/dev`, `/proc/net/snmp[6]` and
//! `/proc/net/sockstat[6]`.

use std::collections::HashMap;

use crate::error::ParseError;
use crate::model::{NetRaw, NetSnmpRaw, NetSockstatRaw};

/// Parses `/proc/net/dev`'s two header lines followed by one row per
/// interface, `<name>: <16 counters>`.
pub fn parse_net_dev(content: &str) -> Result<Vec<(String, NetRaw)>, ParseError> {
    let mut rows = Vec::new();
    for line in content.lines() {
        let Some(colon) = line.find(':') else { continue };
        let name = line[..colon].trim();
        if name.is_empty() || name == "face" {
            continue;
        }
        let values: Vec<u64> = line[colon + 1..]
            .split_whitespace()
            .filter_map(|f| f.parse::<u64>().ok())
            .collect();
        if values.len() < 16 {
            return Err(ParseError::new(format!(
                "net/dev row for {name} has {} fields, expected 16",
                values.len()
            )));
        }
        rows.push((
            name.to_string(),
            NetRaw {
                rx_bytes: values[0],
                rx_packets: values[1],
                rx_errs: values[2],
                rx_drop: values[3],
                rx_fifo: values[4],
                rx_frame: values[5],
                rx_compressed: values[6],
                rx_multicast: values[7],
                tx_bytes: values[8],
                tx_packets: values[9],
                tx_errs: values[10],
                tx_drop: values[11],
                tx_fifo: values[12],
                tx_colls: values[13],
                tx_carrier: values[14],
                tx_compressed: values[15],
            },
        ));
    }
    Ok(rows)
}

/// Parses `/proc/net/snmp` or `/proc/net/snmp6`'s repeated
/// `<Proto>: <key>…` header line followed by a `<Proto>: <value>…` line,
/// into a `"<Proto>.<key>" -> value` map. The kernel has added fields to
/// these blocks over time at varying positions (e.g. `InCsumErrors`), so
/// reading the header row to learn each column's name — rather than a
/// fixed field offset — is what keeps this correct across kernel
/// versions, the same reasoning the per-CPU interrupt grid reader
/// applies to its columns.
pub fn parse_net_snmp_fields(content: &str) -> HashMap<String, u64> {
    let mut fields = HashMap::new();
    let mut lines = content.lines().peekable();
    while let Some(header) = lines.next() {
        let Some(colon) = header.find(':') else { continue };
        let proto = header[..colon].trim();
        if proto.is_empty() {
            continue;
        }
        let Some(values_line) = lines.next() else { break };
        let Some(vcolon) = values_line.find(':') else { continue };
        if values_line[..vcolon].trim() != proto {
            continue;
        }
        let keys: Vec<&str> = header[colon + 1..].split_whitespace().collect();
        let values: Vec<&str> = values_line[vcolon + 1..].split_whitespace().collect();
        for (key, value) in keys.iter().zip(values.iter()) {
            if let Ok(n) = value.parse::<u64>() {
                fields.insert(format!("{proto}.{key}"), n);
            }
        }
    }
    fields
}

/// Extracts the subset of `/proc/net/snmp[6]` fields the derivation
/// library uses. Fields the kernel doesn't expose (older kernels, or the
/// IPv6 block omitting a counter the IPv4 one has) default to zero
/// rather than failing the whole read.
pub fn parse_net_snmp(content: &str) -> NetSnmpRaw {
    let f = parse_net_snmp_fields(content);
    let get = |key: &str| f.get(key).copied().unwrap_or(0);
    NetSnmpRaw {
        ip_in_receives: get("Ip.InReceives"),
        ip_out_requests: get("Ip.OutRequests"),
        ip_forw_datagrams: get("Ip.ForwDatagrams"),
        ip_in_delivers: get("Ip.InDelivers"),
        icmp_in_msgs: get("Icmp.InMsgs"),
        icmp_out_msgs: get("Icmp.OutMsgs"),
        tcp_active_opens: get("Tcp.ActiveOpens"),
        tcp_passive_opens: get("Tcp.PassiveOpens"),
        tcp_in_segs: get("Tcp.InSegs"),
        tcp_out_segs: get("Tcp.OutSegs"),
        tcp_retrans_segs: get("Tcp.RetransSegs"),
        tcp_curr_estab: get("Tcp.CurrEstab"),
        udp_in_datagrams: get("Udp.InDatagrams"),
        udp_out_datagrams: get("Udp.OutDatagrams"),
        udp_no_ports: get("Udp.NoPorts"),
        udp_in_errors: get("Udp.InErrors"),
    }
}

/// Parses `/proc/net/sockstat` or `/proc/net/sockstat6`'s
/// `<Proto>: <label> <n> [<label> <n> …]` lines. Each label/value pair
/// is taken two tokens at a time after the protocol name, mirroring how
/// the kernel writes a variable, protocol-dependent set of gauges on
/// each line (`TCP:` has `inuse`/`orphan`/`tw`/…, `FRAG:` has only
/// `inuse`/`memory`).
pub fn parse_net_sockstat(content: &str) -> NetSockstatRaw {
    let mut out = NetSockstatRaw::default();
    for line in content.lines() {
        let Some(colon) = line.find(':') else { continue };
        let proto = line[..colon].trim();
        let tokens: Vec<&str> = line[colon + 1..].split_whitespace().collect();
        let labeled: HashMap<&str, u64> =
            tokens.chunks_exact(2).filter_map(|pair| pair[1].parse::<u64>().ok().map(|n| (pair[0], n))).collect();
        match proto {
            "sockets" => out.sock_inuse = labeled.get("used").copied().unwrap_or(0),
            "TCP" => {
                out.tcp_inuse = labeled.get("inuse").copied().unwrap_or(0);
                out.tcp_tw = labeled.get("tw").copied().unwrap_or(0);
            }
            "UDP" => out.udp_inuse = labeled.get("inuse").copied().unwrap_or(0),
            "RAW" => out.raw_inuse = labeled.get("inuse").copied().unwrap_or(0),
            "FRAG" => out.frag_inuse = labeled.get("inuse").copied().unwrap_or(0),
            _ => {}
        }
    }
    out
}
