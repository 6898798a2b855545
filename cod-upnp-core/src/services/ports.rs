use log::debug;
use std::collections::BTreeSet;
use thiserror::Error;

use crate::models::{PortOwnership, Protocol, Selector, owner_label};
use crate::table::GameTable;

/// 範囲指定の区切り文字
const RANGE_SEPARATOR: char = '-';

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PortRangeError {
    #[error("Invalid port in range {range:?}: {value:?}")]
    Invalid { range: String, value: String },

    #[error("Reversed port range {range:?}: {low} > {high}")]
    Reversed { range: String, low: u16, high: u16 },
}

fn parse_port(range: &str, value: &str) -> Result<u16, PortRangeError> {
    value.trim().parse().map_err(|_| PortRangeError::Invalid {
        range: range.to_string(),
        value: value.to_string(),
    })
}

/// [expand_ranges]
/// `"3074"` や `"27014-27050"` のようなポート範囲文字列を、個々のポート番号に展開します。
///
/// 範囲は両端を含み、下限から昇順に出力されます。数値でない値や逆順の範囲は
/// 補正せずにエラーとして返します。重複のチェックは行いません。
pub fn expand_ranges<S: AsRef<str>>(ranges: &[S]) -> Result<Vec<u16>, PortRangeError> {
    let mut ports = Vec::new();
    for entry in ranges {
        let entry = entry.as_ref();
        match entry.split_once(RANGE_SEPARATOR) {
            None => ports.push(parse_port(entry, entry)?),
            Some((low, high)) => {
                let low = parse_port(entry, low)?;
                let high = parse_port(entry, high)?;
                if low > high {
                    return Err(PortRangeError::Reversed {
                        range: entry.to_string(),
                        low,
                        high,
                    });
                }
                ports.extend(low..=high);
            }
        }
    }
    Ok(ports)
}

/// [aggregate]
/// セレクタに合致する全ての (ゲーム, プラットフォーム) について TCP / UDP ポートを展開し、
/// ポートごとの所有者マップにまとめます。
///
/// 2 つ以上の組み合わせが同じポートを要求した場合、そのポートのラベルは `cod_multi` になります。
/// 1 つの組み合わせの中で範囲が重なっているポートは、1 回の要求として扱います。
pub fn aggregate(
    table: &GameTable,
    game: &Selector,
    platform: &Selector,
) -> Result<PortOwnership, PortRangeError> {
    let mut ownership = PortOwnership::new();

    for entry in table.entries().iter().filter(|g| game.matches(&g.name)) {
        for p in entry.platforms.iter().filter(|p| platform.matches(&p.name)) {
            let label = owner_label(&entry.name, &p.name);
            for protocol in [Protocol::TCP, Protocol::UDP] {
                let ports: BTreeSet<u16> =
                    expand_ranges(p.ports.for_protocol(protocol))?.into_iter().collect();
                debug!("{}: {} {} ports", label, ports.len(), protocol);
                for port in ports {
                    ownership.claim(protocol, port, &label);
                }
            }
        }
    }

    Ok(ownership)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Game, MULTI_OWNER, Platform, PortRanges};

    fn platform(name: &str, tcp: &[&str], udp: &[&str]) -> Platform {
        Platform {
            name: name.into(),
            ports: PortRanges {
                tcp: tcp.iter().map(|s| s.to_string()).collect(),
                udp: udp.iter().map(|s| s.to_string()).collect(),
            },
        }
    }

    #[test]
    fn single_port_expands_to_itself() {
        for port in [1u16, 80, 3074, 65535] {
            assert_eq!(expand_ranges(&[port.to_string()]).unwrap(), vec![port]);
        }
    }

    #[test]
    fn range_expands_inclusive_ascending() {
        for (low, high) in [(27014u16, 27050u16), (500, 500), (65530, 65535)] {
            let ports = expand_ranges(&[format!("{}-{}", low, high)]).unwrap();
            assert_eq!(ports.len(), (high - low + 1) as usize);
            assert_eq!(ports, (low..=high).collect::<Vec<_>>());
        }
    }

    #[test]
    fn modern_warfare_pc_tcp_list() {
        let ports = expand_ranges(&["3074", "27014-27050"]).unwrap();
        assert_eq!(ports[0], 3074);
        assert_eq!(ports[1], 27014);
        assert_eq!(*ports.last().unwrap(), 27050);
        assert_eq!(ports.len(), 1 + 37);
    }

    #[test]
    fn malformed_ranges_fail_loudly() {
        assert!(matches!(
            expand_ranges(&["abc"]),
            Err(PortRangeError::Invalid { .. })
        ));
        assert!(matches!(
            expand_ranges(&["100-x"]),
            Err(PortRangeError::Invalid { .. })
        ));
        assert!(matches!(
            expand_ranges(&["70000"]),
            Err(PortRangeError::Invalid { .. })
        ));
        assert_eq!(
            expand_ranges(&["200-100"]),
            Err(PortRangeError::Reversed {
                range: "200-100".into(),
                low: 200,
                high: 100
            })
        );
    }

    #[test]
    fn single_game_platform_owns_its_ports() {
        let table = GameTable::builtin();
        let owners = aggregate(&table, &"Modern Warfare".into(), &"PC".into()).unwrap();
        assert_eq!(owners.tcp[&3074], "Modern Warfare_PC");
        for port in 27014..=27050 {
            assert_eq!(owners.tcp[&port], "Modern Warfare_PC");
        }
        assert_eq!(owners.tcp.len(), 38);
    }

    #[test]
    fn shared_port_across_platforms_is_multi() {
        let table = GameTable::builtin();
        let owners = aggregate(&table, &"Modern Warfare".into(), &Selector::All).unwrap();
        assert_eq!(owners.tcp[&3074], MULTI_OWNER);
        // PC のみが使うポート
        assert_eq!(owners.tcp[&27014], "Modern Warfare_PC");
        // Xbox One のみが使うポート
        assert_eq!(owners.udp[&3544], "Modern Warfare_Xbox One");
    }

    #[test]
    fn multi_does_not_depend_on_table_order() {
        let a = Game {
            name: "A".into(),
            platforms: vec![platform("PC", &["3074"], &[])],
        };
        let b = Game {
            name: "B".into(),
            platforms: vec![platform("PC", &["3070-3080"], &[])],
        };
        for games in [vec![a.clone(), b.clone()], vec![b, a]] {
            let owners = aggregate(&GameTable::new(games), &Selector::All, &"PC".into()).unwrap();
            assert_eq!(owners.tcp[&3074], MULTI_OWNER);
            assert_eq!(owners.tcp[&3070], "B_PC");
        }
    }

    #[test]
    fn pairs_with_the_same_label_are_distinct_claimants() {
        let table = GameTable::new(vec![
            Game {
                name: "A_B".into(),
                platforms: vec![platform("C", &["3074"], &[])],
            },
            Game {
                name: "A".into(),
                platforms: vec![platform("B_C", &["3074"], &[])],
            },
        ]);
        let owners = aggregate(&table, &Selector::All, &Selector::All).unwrap();
        assert_eq!(owners.tcp[&3074], MULTI_OWNER);
    }

    #[test]
    fn overlap_inside_one_pair_is_a_single_claim() {
        let table = GameTable::new(vec![Game {
            name: "X".into(),
            platforms: vec![platform("PC", &["3074", "3074-3079"], &[])],
        }]);
        let owners = aggregate(&table, &Selector::All, &Selector::All).unwrap();
        assert_eq!(owners.tcp[&3074], "X_PC");
        assert_eq!(owners.tcp.len(), 6);
    }

    #[test]
    fn all_games_for_one_platform() {
        let table = GameTable::builtin();
        let owners = aggregate(&table, &Selector::All, &"Xbox One".into()).unwrap();
        // Modern Warfare / Warzone / Black Ops Cold War の Xbox One が共有
        assert_eq!(owners.tcp[&3074], MULTI_OWNER);
        assert!(owners.tcp.values().all(|l| l == MULTI_OWNER || l.ends_with("_Xbox One")));
    }

    #[test]
    fn unknown_selectors_yield_nothing() {
        let table = GameTable::builtin();
        let owners = aggregate(&table, &"Nonexistent Game".into(), &Selector::All).unwrap();
        assert!(owners.is_empty());
    }

    #[test]
    fn bad_range_in_table_aborts_aggregation() {
        let table = GameTable::new(vec![Game {
            name: "Broken".into(),
            platforms: vec![platform("PC", &["3074"], &["9-1"])],
        }]);
        assert!(aggregate(&table, &Selector::All, &Selector::All).is_err());
    }
}
