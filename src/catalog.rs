//! Entity catalogs: the fixed sets of game modes and operators, with the
//! statistic-key derivations the remote API matches literally.
//!
//! Both tables are process-wide immutable state. The operator table is built
//! once on first access and never mutated afterwards, so unsynchronized
//! concurrent reads are safe.

use serde::Serialize;
use std::sync::LazyLock;

/// Which side an operator plays on. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Attacker,
    Defender,
}

impl Role {
    /// Short form used by the remote API.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Attacker => "atk",
            Role::Defender => "def",
        }
    }
}

/// One playable game mode and the token the remote API knows it by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Gamemode {
    /// Identifier used by the remote statistics API. Lowercase, unique.
    pub remote_token: &'static str,
    /// Human-readable label.
    pub name: &'static str,
}

impl Gamemode {
    /// Remote statistic key for this mode, e.g. `plantbombpvp_kills:infinite`.
    ///
    /// The separator and `:infinite` suffix are matched byte-for-byte by the
    /// remote API; any deviation silently returns no data.
    pub fn statistic_key(&self, statistic: &str) -> String {
        format!("{}pvp_{}:infinite", self.remote_token, statistic)
    }
}

/// All modes, in declaration order.
pub static GAMEMODES: [Gamemode; 3] = [
    Gamemode {
        remote_token: "securearea",
        name: "Secure Area",
    },
    Gamemode {
        remote_token: "rescuehostage",
        name: "Hostage Rescue",
    },
    Gamemode {
        remote_token: "plantbomb",
        name: "Bomb",
    },
];

/// Looks up a mode by its remote token, case-insensitively.
///
/// An unknown token is a normal miss, not an error.
pub fn find_gamemode(token: &str) -> Option<&'static Gamemode> {
    GAMEMODES
        .iter()
        .find(|mode| mode.remote_token.eq_ignore_ascii_case(token))
}

/// One playable operator.
///
/// `index` is an opaque paging token assigned by the remote API (`"2:1"`,
/// `"3:A"`, ...). It is not numeric and must never be parsed or sorted as a
/// number; table declaration order is the display order.
#[derive(Debug, Clone, Serialize)]
pub struct Operator {
    /// Lowercase identifier, derived once from the canonical name.
    pub id: String,
    /// Display name; may carry diacritics the id does not.
    pub name: &'static str,
    pub role: Role,
    /// Opaque sort/paging token from the remote API.
    pub index: &'static str,
    /// Statistic token for the operator's signature gadget.
    pub gadget: &'static str,
    /// External badge image locator.
    pub badge_url: &'static str,
}

impl Operator {
    fn new(
        canonical: &str,
        name: &'static str,
        role: Role,
        index: &'static str,
        gadget: &'static str,
        badge_url: &'static str,
    ) -> Self {
        Operator {
            id: canonical.to_lowercase(),
            name,
            role,
            index,
            gadget,
            badge_url,
        }
    }

    /// Remote key counting uses of this operator's signature gadget,
    /// e.g. `operatorpvp_smoke_poisongaskill:2:1`.
    pub fn gadget_statistic_key(&self) -> String {
        format!("operatorpvp_{}_{}:{}", self.id, self.gadget, self.index)
    }

    /// Remote key for a general per-operator statistic,
    /// e.g. `operatorpvp_kills:2:1:infinite`.
    pub fn statistic_key(&self, statistic: &str) -> String {
        format!("operatorpvp_{}:{}:infinite", statistic, self.index)
    }
}

/// All operators, in declaration order. Canonical names are ASCII; the two
/// entries with diacritics in their display name ("Jäger", "Capitão") derive
/// their ids from the plain-ASCII canonical form ("jager", "capitao").
pub static OPERATORS: LazyLock<Vec<Operator>> = LazyLock::new(|| {
    use Role::{Attacker as Atk, Defender as Def};
    vec![
        Operator::new("Smoke", "Smoke", Def, "2:1", "poisongaskill", "https://ubistatic-a.akamaihd.net/0058/prod/assets/images/badge-smoke.874e9888.png"),
        Operator::new("Mute", "Mute", Def, "3:1", "gadgetjammed", "https://ubistatic-a.akamaihd.net/0058/prod/assets/images/badge-mute.3e4f2b01.png"),
        Operator::new("Sledge", "Sledge", Atk, "4:1", "hammerhole", "https://ubistatic-a.akamaihd.net/0058/prod/assets/images/badge-sledge.00141f92.png"),
        Operator::new("Thatcher", "Thatcher", Atk, "5:1", "gadgetdestroywithemp", "https://ubistatic-a.akamaihd.net/0058/prod/assets/images/badge-thatcher.b1cac8e7.png"),
        Operator::new("Castle", "Castle", Def, "2:2", "kevlarbarricadedeployed", "https://ubistatic-a.akamaihd.net/0058/prod/assets/images/badge-castle.378f8f4e.png"),
        Operator::new("Ash", "Ash", Atk, "3:2", "bonfirewallbreached", "https://ubistatic-a.akamaihd.net/0058/prod/assets/images/badge-ash.16913d82.png"),
        Operator::new("Pulse", "Pulse", Def, "4:2", "heartbeatspot", "https://ubistatic-a.akamaihd.net/0058/prod/assets/images/badge-pulse.9de627c5.png"),
        Operator::new("Thermite", "Thermite", Atk, "5:2", "reinforcementbreached", "https://ubistatic-a.akamaihd.net/0058/prod/assets/images/badge-thermite.9010fa33.png"),
        Operator::new("Doc", "Doc", Def, "2:3", "teammaterevive", "https://ubistatic-a.akamaihd.net/0058/prod/assets/images/badge-doc.29fe751b.png"),
        Operator::new("Rook", "Rook", Def, "3:3", "armortakenteammate", "https://ubistatic-a.akamaihd.net/0058/prod/assets/images/badge-rook.eb954a4e.png"),
        Operator::new("Twitch", "Twitch", Atk, "4:3", "gadgetdestroybyshockdrone", "https://ubistatic-a.akamaihd.net/0058/prod/assets/images/badge-twitch.83cbfa97.png"),
        Operator::new("Montagne", "Montagne", Atk, "5:3", "shieldblockdamage", "https://ubistatic-a.akamaihd.net/0058/prod/assets/images/badge-montagne.2078ee84.png"),
        Operator::new("Glaz", "Glaz", Atk, "2:4", "sniperkill", "https://ubistatic-a.akamaihd.net/0058/prod/assets/images/badge-glaz.43dd3bdf.png"),
        Operator::new("Fuze", "Fuze", Atk, "3:4", "clusterchargekill", "https://ubistatic-a.akamaihd.net/0058/prod/assets/images/badge-fuze.9e7e9222.png"),
        Operator::new("Kapkan", "Kapkan", Def, "4:4", "boobytrapkill", "https://ubistatic-a.akamaihd.net/0058/prod/assets/images/badge-kapkan.562d0701.png"),
        Operator::new("Tachanka", "Tachanka", Def, "5:4", "turretkill", "https://ubistatic-a.akamaihd.net/0058/prod/assets/images/badge-tachanka.ae7943f0.png"),
        Operator::new("Blitz", "Blitz", Atk, "2:5", "flashedenemy", "https://ubistatic-a.akamaihd.net/0058/prod/assets/images/badge-blitz.cd45df08.png"),
        Operator::new("IQ", "IQ", Atk, "3:5", "gadgetspotbyef", "https://ubistatic-a.akamaihd.net/0058/prod/assets/images/badge-iq.b1acee1a.png"),
        Operator::new("Jager", "Jäger", Def, "4:5", "gadgetdestroybycatcher", "https://ubistatic-a.akamaihd.net/0058/prod/assets/images/badge-jager.600b2773.png"),
        Operator::new("Bandit", "Bandit", Def, "5:5", "batterykill", "https://ubistatic-a.akamaihd.net/0058/prod/assets/images/badge-bandit.385144d9.png"),
        Operator::new("Buck", "Buck", Atk, "2:6", "buck_kill", "https://ubistatic-a.akamaihd.net/0058/prod/assets/images/badge-buck.2fc3e097.png"),
        Operator::new("Frost", "Frost", Def, "3:6", "frost_dbno", "https://ubistatic-a.akamaihd.net/0058/prod/assets/images/badge-frost.e5362220.png"),
        Operator::new("Blackbeard", "Blackbeard", Atk, "2:7", "gunshieldblockdamage", "https://ubistatic-a.akamaihd.net/0058/prod/assets/images/badge-blackbeard.fccd7e2c.png"),
        Operator::new("Valkyrie", "Valkyrie", Def, "3:7", "camdeployed", "https://ubistatic-a.akamaihd.net/0058/prod/assets/images/badge-valkyrie.f87cb6bd.png"),
        Operator::new("Capitao", "Capitão", Atk, "2:8", "lethaldartkills", "https://ubistatic-a.akamaihd.net/0058/prod/assets/images/badge-capitao.6603e417.png"),
        Operator::new("Caveira", "Caveira", Def, "3:8", "interrogations", "https://ubistatic-a.akamaihd.net/0058/prod/assets/images/badge-caveira.757e9259.png"),
        Operator::new("Hibana", "Hibana", Atk, "2:9", "detonate_projectile", "https://ubistatic-a.akamaihd.net/0058/prod/assets/images/badge-hibana.c2a8477d.png"),
        Operator::new("Echo", "Echo", Def, "3:9", "enemy_sonicburst_affected", "https://ubistatic-a.akamaihd.net/0058/prod/assets/images/badge-echo.a77c7d7e.png"),
        Operator::new("Jackal", "Jackal", Atk, "2:A", "cazador_assist_kill", "https://ubistatic-a.akamaihd.net/0058/prod/assets/images/badge-jackal.0326ca29.png"),
        Operator::new("Mira", "Mira", Def, "3:A", "black_mirror_gadget_deployed", "https://ubistatic-a.akamaihd.net/0058/prod/assets/images/badge-mira.22fb72a5.png"),
        Operator::new("Ying", "Ying", Atk, "2:B", "dazzler_gadget_detonate", "https://ubistatic-a.akamaihd.net/0058/prod/assets/images/badge-ying.b88be612.png"),
        Operator::new("Lesion", "Lesion", Def, "3:B", "caltrop_enemy_affected", "https://ubistatic-a.akamaihd.net/0058/prod/assets/images/badge-lesion.07c3d352.png"),
        Operator::new("Ela", "Ela", Def, "2:C", "concussionmine_detonate", "https://ubistatic-a.akamaihd.net/0058/prod/assets/images/badge-ela.63ec2d26.png"),
        Operator::new("Zofia", "Zofia", Atk, "3:C", "concussiongrenade_detonate", "https://ubistatic-a.akamaihd.net/0058/prod/assets/images/badge-zofia.2a892bf5.png"),
        Operator::new("Vigil", "Vigil", Def, "2:D", "attackerdrone_diminishedrealitymode", "https://ubistatic-a.akamaihd.net/0058/prod/assets/images/badge-vigil.4db5385b.png"),
        Operator::new("Dokkaebi", "Dokkaebi", Atk, "3:D", "phoneshacked", "https://ubistatic-a.akamaihd.net/0058/prod/assets/images/badge-dokkaebi.2f83a34f.png"),
        Operator::new("Lion", "Lion", Atk, "3:E", "tagger_tagdevice_spot", "https://ubistatic-a.akamaihd.net/0058/prod/assets/images/badge-lion.69637075.png"),
        Operator::new("Finka", "Finka", Atk, "4:E", "rush_adrenalinerush", "https://ubistatic-a.akamaihd.net/0058/prod/assets/images/badge-finka.71d3a243.png"),
        Operator::new("Maestro", "Maestro", Def, "2:F", "killswithturret", "https://ubistatic-a.akamaihd.net/0058/prod/assets/images/badge-maestro.b6cf7905.png"),
        Operator::new("Alibi", "Alibi", Def, "3:F", "revealedattackers", "https://ubistatic-a.akamaihd.net/0058/prod/assets/images/badge-alibi.7fba8d33.png"),
    ]
});

/// Looks up an operator by id, case-insensitively. `None` on miss.
pub fn find_operator(id: &str) -> Option<&'static Operator> {
    OPERATORS.iter().find(|op| op.id.eq_ignore_ascii_case(id))
}
