//! Types Module
//!
//! クレート全体で使用する共通データ型と、変換結果のレコード型を定義するモジュール。

use serde::{Deserialize, Serialize};

/// セルの値を表す列挙型
///
/// トークン正規化の対象になるのは`String`のみです。
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CellValue {
    /// 数値（整数・浮動小数点数）
    Number,

    /// 文字列
    String(String),

    /// 論理値
    Bool,

    /// 日付・時刻など、その他の型付き値
    Other,

    /// 空セル
    Empty,
}

impl CellValue {
    /// 文字列セルの場合のみ、その内容を返す
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::String(s) if !s.is_empty() => Some(s.as_str()),
            _ => None,
        }
    }
}

impl From<&calamine::Data> for CellValue {
    fn from(cell: &calamine::Data) -> Self {
        use calamine::Data;
        match cell {
            Data::Int(_) | Data::Float(_) => CellValue::Number,
            Data::String(s) => CellValue::String(s.clone()),
            Data::Bool(_) => CellValue::Bool,
            Data::Empty => CellValue::Empty,
            _ => CellValue::Other,
        }
    }
}

/// トークンの所属セクション
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// デバイス一覧
    Devices,
    /// グループ一覧
    Groups,
    /// シーン一覧
    Scenes,
    /// リモコンのボタン割り当て
    RemoteControls,
}

impl Section {
    /// すべてのセクション（出力順）
    pub const ALL: [Section; 4] = [
        Section::Devices,
        Section::Groups,
        Section::Scenes,
        Section::RemoteControls,
    ];
}

/// デバイスレコード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    /// ハードウェア種別コード（例: `KBSKTDIM`）
    pub appearance_shortname: String,
    /// デバイス名
    pub device_name: String,
}

/// グループレコード
///
/// `devices`は常に空です。元データからグループとデバイスの対応は復元できません。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// グループ名
    pub group_name: String,
    /// 所属デバイス名（未使用）
    pub devices: Vec<String>,
}

impl Group {
    /// 所属デバイスが空のグループを生成
    pub fn new(group_name: impl Into<String>) -> Self {
        Self {
            group_name: group_name.into(),
            devices: Vec::new(),
        }
    }
}

/// シーン内容の状態条件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusConditions {
    /// 明るさレベル（通常は0〜100。シートに書かれた値をそのまま保持）
    pub level: i32,
}

/// シーンの制御内容（1行分）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneContent {
    /// 制御対象の名前
    pub name: String,
    /// 状態（例: `ON`, `OFF`, `DIM`）
    pub status: String,
    /// 状態条件
    pub status_conditions: StatusConditions,
}

impl SceneContent {
    /// 明るさレベル
    pub fn level(&self) -> i32 {
        self.status_conditions.level
    }
}

/// シーンレコード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    /// シーン名
    pub scene_name: String,
    /// 制御内容
    pub contents: Vec<SceneContent>,
}

/// リモコンボタンのリンク種別
///
/// 出力JSONでは整数コード（0〜3）として表現されます。
/// 設定ファイル上では名前（`"Scene"`など）で記述します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkType {
    /// 単一デバイス
    Device = 0,
    /// グループ
    Group = 1,
    /// シーン
    Scene = 2,
    /// 「起こさないで」（Do Not Disturb）
    DoNotDisturb = 3,
}

impl LinkType {
    /// 出力用の整数コード
    pub fn code(self) -> u8 {
        self as u8
    }

    /// 整数コードから種別を復元
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(LinkType::Device),
            1 => Some(LinkType::Group),
            2 => Some(LinkType::Scene),
            3 => Some(LinkType::DoNotDisturb),
            _ => None,
        }
    }
}

/// `LinkType`を整数コードとして読み書きするserdeヘルパー
mod link_type_code {
    use super::LinkType;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(link_type: &LinkType, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(link_type.code())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<LinkType, D::Error> {
        let code = u8::deserialize(deserializer)?;
        LinkType::from_code(code)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid link type code: {}", code)))
    }
}

/// リモコンボタンのリンク
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    /// ボタン位置（0始まり）
    pub link_index: u32,
    /// リンク種別
    #[serde(with = "link_type_code")]
    pub link_type: LinkType,
    /// リンク先の名前
    pub link_name: String,
}

/// リモコンレコード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteControl {
    /// リモコン名
    pub remote_name: String,
    /// ボタンのリンク
    pub links: Vec<Link>,
}

/// 変換結果のドキュメント
///
/// 4つのキーは常に出力されます（空配列の場合も含む）。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgrammingDocument {
    /// デバイス一覧
    pub devices: Vec<Device>,
    /// グループ一覧
    pub groups: Vec<Group>,
    /// シーン一覧
    pub scenes: Vec<Scene>,
    /// リモコン一覧
    pub remote_controls: Vec<RemoteControl>,
}

impl ProgrammingDocument {
    /// すべてのセクションが空かどうか
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
            && self.groups.is_empty()
            && self.scenes.is_empty()
            && self.remote_controls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cell_value_as_text() {
        assert_eq!(CellValue::String("KBSKTDIM".to_string()).as_text(), Some("KBSKTDIM"));
        assert_eq!(CellValue::String(String::new()).as_text(), None);
        assert_eq!(CellValue::Number.as_text(), None);
        assert_eq!(CellValue::Bool.as_text(), None);
        assert_eq!(CellValue::Other.as_text(), None);
        assert_eq!(CellValue::Empty.as_text(), None);
    }

    #[test]
    fn test_cell_value_from_calamine() {
        use calamine::Data;
        assert_eq!(CellValue::from(&Data::Int(3)), CellValue::Number);
        assert_eq!(CellValue::from(&Data::Float(2.5)), CellValue::Number);
        assert_eq!(CellValue::from(&Data::Bool(true)), CellValue::Bool);
        assert_eq!(
            CellValue::from(&Data::String("NAME:".to_string())),
            CellValue::String("NAME:".to_string())
        );
        assert_eq!(CellValue::from(&Data::Empty), CellValue::Empty);
    }

    #[test]
    fn test_link_type_codes() {
        assert_eq!(LinkType::Device.code(), 0);
        assert_eq!(LinkType::Group.code(), 1);
        assert_eq!(LinkType::Scene.code(), 2);
        assert_eq!(LinkType::DoNotDisturb.code(), 3);
        assert_eq!(LinkType::from_code(2), Some(LinkType::Scene));
        assert_eq!(LinkType::from_code(4), None);
    }

    #[test]
    fn test_link_serializes_type_as_integer() {
        let link = Link {
            link_index: 3,
            link_type: LinkType::Group,
            link_name: "Living Room".to_string(),
        };
        let value = serde_json::to_value(&link).unwrap();
        assert_eq!(
            value,
            json!({"linkIndex": 3, "linkType": 1, "linkName": "Living Room"})
        );

        let back: Link = serde_json::from_value(value).unwrap();
        assert_eq!(back, link);
    }

    #[test]
    fn test_link_rejects_unknown_type_code() {
        let result = serde_json::from_value::<Link>(
            json!({"linkIndex": 0, "linkType": 9, "linkName": "X"}),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_scene_content_nests_level() {
        let content = SceneContent {
            name: "Lamp3".to_string(),
            status: "DIM".to_string(),
            status_conditions: StatusConditions { level: 45 },
        };
        assert_eq!(content.level(), 45);
        assert_eq!(
            serde_json::to_value(&content).unwrap(),
            json!({"name": "Lamp3", "status": "DIM", "statusConditions": {"level": 45}})
        );
    }

    #[test]
    fn test_empty_document_has_four_keys() {
        let doc = ProgrammingDocument::default();
        assert!(doc.is_empty());
        assert_eq!(
            serde_json::to_value(&doc).unwrap(),
            json!({"devices": [], "groups": [], "scenes": [], "remoteControls": []})
        );
    }

    #[test]
    fn test_group_new_has_no_devices() {
        let group = Group::new("Living Room");
        assert_eq!(
            serde_json::to_value(&group).unwrap(),
            json!({"groupName": "Living Room", "devices": []})
        );
    }
}
