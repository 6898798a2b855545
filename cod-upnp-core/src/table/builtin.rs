//! 組み込みのゲーム / プラットフォーム別ポート表

pub(super) struct PlatformEntry {
    pub name: &'static str,
    pub tcp: &'static [&'static str],
    pub udp: &'static [&'static str],
}

pub(super) struct GameEntry {
    pub name: &'static str,
    pub platforms: &'static [PlatformEntry],
}

const PC_TCP: &[&str] = &["3074", "27014-27050"];
const PS4_TCP: &[&str] = &["80", "443", "1935", "3074", "3478-3480"];
const PS4_UDP: &[&str] = &["3074", "3478-3479"];
const XBOX_TCP: &[&str] = &["3074"];
const XBOX_UDP: &[&str] = &["88", "500", "3074-3075", "3544", "4500"];

pub(super) const GAMES: &[GameEntry] = &[
    GameEntry {
        name: "Modern Warfare",
        platforms: &[
            PlatformEntry {
                name: "PC",
                tcp: PC_TCP,
                udp: &["3074", "3478", "4379-4380", "27000-27031", "27036"],
            },
            PlatformEntry { name: "PS4", tcp: PS4_TCP, udp: PS4_UDP },
            PlatformEntry { name: "Xbox One", tcp: XBOX_TCP, udp: XBOX_UDP },
        ],
    },
    GameEntry {
        name: "Warzone",
        platforms: &[
            PlatformEntry {
                name: "PC",
                tcp: PC_TCP,
                udp: &["3074", "3478", "4379-4380", "27000-27031", "27036"],
            },
            PlatformEntry { name: "PS4", tcp: PS4_TCP, udp: PS4_UDP },
            PlatformEntry { name: "Xbox One", tcp: XBOX_TCP, udp: XBOX_UDP },
        ],
    },
    GameEntry {
        name: "Black Ops Cold War",
        platforms: &[
            PlatformEntry {
                name: "PC",
                tcp: PC_TCP,
                udp: &["3074-3079", "3478", "4379-4380", "27000-27031", "27036"],
            },
            PlatformEntry {
                name: "PS4",
                tcp: &["80", "443", "1935", "3478-3480"],
                udp: PS4_UDP,
            },
            PlatformEntry { name: "Xbox One", tcp: XBOX_TCP, udp: XBOX_UDP },
        ],
    },
    GameEntry {
        name: "Vanguard",
        platforms: &[
            PlatformEntry {
                name: "PC",
                tcp: PC_TCP,
                udp: &["3074", "3478", "4379-4380", "27000-27031", "27036"],
            },
            PlatformEntry { name: "PS4", tcp: PS4_TCP, udp: PS4_UDP },
        ],
    },
];
