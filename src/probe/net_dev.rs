// Interface byte counters in the Linux /proc/net/dev format.
//
//   Inter-|   Receive                            ...|  Transmit
//    face |bytes    packets errs drop fifo frame ...|bytes    packets ...
//     eth0: 1234    10      0    0    0    0     ...  5678     12      ...

use super::ProbeError;
use crate::models::TrafficTotals;
use std::path::Path;

/// Header rows preceding the first interface.
const HEADER_LINES: usize = 2;
/// Counter columns after the interface name; receive bytes is 0, transmit bytes is 8.
const RX_BYTES_COLUMN: usize = 0;
const TX_BYTES_COLUMN: usize = 8;

/// Sum receive and transmit bytes across every interface.
///
/// Rows with fewer counter columns than needed are skipped; a counter that is
/// not a number fails the whole read.
pub fn parse_net_dev(content: &str) -> Result<TrafficTotals, ProbeError> {
    let mut totals = TrafficTotals::default();
    for (idx, line) in content.lines().enumerate().skip(HEADER_LINES) {
        let Some((_iface, counters)) = line.split_once(':') else {
            continue;
        };
        let columns: Vec<&str> = counters.split_whitespace().collect();
        if columns.len() <= TX_BYTES_COLUMN {
            continue;
        }
        let rx = parse_counter(columns[RX_BYTES_COLUMN], idx + 1)?;
        let tx = parse_counter(columns[TX_BYTES_COLUMN], idx + 1)?;
        totals.traffic_in = totals.traffic_in.saturating_add(rx);
        totals.traffic_out = totals.traffic_out.saturating_add(tx);
    }
    Ok(totals)
}

fn parse_counter(value: &str, line: usize) -> Result<u64, ProbeError> {
    value
        .parse::<u64>()
        .map_err(|_| ProbeError::MalformedCounter {
            line,
            value: value.to_string(),
        })
}

pub(super) async fn read_net_dev(path: &Path) -> Result<TrafficTotals, ProbeError> {
    let content = tokio::fs::read_to_string(path).await?;
    parse_net_dev(&content)
}
