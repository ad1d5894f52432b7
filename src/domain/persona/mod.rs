//! Persona Context - 评论人设目录
//!
//! 六个固定的模拟读者人设，闭集：
//! - 启动时种子化到数据库，运行期只读
//! - 每个类型映射到一段固定的评审视角提示词
//! - 未知类型退化为通用评审视角（不报错）

use serde::{Deserialize, Serialize};

/// 人设类型 - 闭集，类型标签即数据库主键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PersonaType {
    /// 休闲读者
    CasualReader,
    /// 文学评论家
    LiteraryCritic,
    /// 类型小说迷
    GenreEnthusiast,
    /// 出版编辑
    Editor,
    /// 商业出版人
    CommercialPublisher,
    /// 同行作者
    FellowWriter,
}

impl PersonaType {
    /// 全部人设类型，顺序即种子顺序
    pub const ALL: [PersonaType; 6] = [
        PersonaType::CasualReader,
        PersonaType::LiteraryCritic,
        PersonaType::GenreEnthusiast,
        PersonaType::Editor,
        PersonaType::CommercialPublisher,
        PersonaType::FellowWriter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PersonaType::CasualReader => "casual-reader",
            PersonaType::LiteraryCritic => "literary-critic",
            PersonaType::GenreEnthusiast => "genre-enthusiast",
            PersonaType::Editor => "editor",
            PersonaType::CommercialPublisher => "commercial-publisher",
            PersonaType::FellowWriter => "fellow-writer",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "casual-reader" => Some(PersonaType::CasualReader),
            "literary-critic" => Some(PersonaType::LiteraryCritic),
            "genre-enthusiast" => Some(PersonaType::GenreEnthusiast),
            "editor" => Some(PersonaType::Editor),
            "commercial-publisher" => Some(PersonaType::CommercialPublisher),
            "fellow-writer" => Some(PersonaType::FellowWriter),
            _ => None,
        }
    }

    /// 该人设的评审视角提示词片段（侧重点 + 语气）
    pub fn prompt_fragment(&self) -> &'static str {
        match self {
            PersonaType::CasualReader => {
                "作为一名普通读者，你看重故事的趣味性和代入感。\
                 请用亲切、直率的语气进行评价，重点关注趣味性、可读性和共鸣感。"
            }
            PersonaType::LiteraryCritic => {
                "作为一名专业的文学评论家，你看重作品的文学价值。\
                 请用严谨、学术的语气进行评价，重点关注文笔、主题意识、叙事结构和象征手法。"
            }
            PersonaType::GenreEnthusiast => {
                "作为某一类型小说的狂热爱好者，你看重类型文法与独创性。\
                 请用热情、善于比较分析的语气进行评价，重点关注类型惯例、桥段运用和新颖度。"
            }
            PersonaType::Editor => {
                "作为一名出版编辑，你持有务实、客观的视角。\
                 请用客观、注重实务的语气进行评价，重点关注错别字、语法、句子结构和可读性。"
            }
            PersonaType::CommercialPublisher => {
                "作为一名商业出版人，你看重市场性与商业潜力。\
                 请用商业导向、有战略眼光的语气进行评价，重点关注市场趋势、商业潜力和目标读者群。"
            }
            PersonaType::FellowWriter => {
                "作为一名同样在创作的作家同行，你抱有共情与鼓励的态度。\
                 请用温暖、支持的语气进行评价，重点关注创作过程、作者意图和技术上的挑战。"
            }
        }
    }
}

impl std::fmt::Display for PersonaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 未知人设类型时使用的通用评审视角（无人设特色）
pub const GENERIC_PROMPT_FRAGMENT: &str =
    "作为一名认真的读者，请客观、平衡地评价这一章节。";

/// 按类型标签取评审视角片段
///
/// 未知标签不报错，退化为通用评审视角
pub fn prompt_fragment_for(type_tag: &str) -> &'static str {
    PersonaType::from_str(type_tag)
        .map(|t| t.prompt_fragment())
        .unwrap_or(GENERIC_PROMPT_FRAGMENT)
}

/// 人设描述符（目录条目）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    pub persona_type: PersonaType,
    pub name: &'static str,
    pub description: &'static str,
    pub evaluation_criteria: &'static str,
    pub tone: &'static str,
}

/// 固定人设目录
///
/// 顺序即种子顺序；数据库 personas 表由此表种子化
pub const CATALOG: [Persona; 6] = [
    Persona {
        persona_type: PersonaType::CasualReader,
        name: "休闲读者",
        description: "普通读者，看重趣味性和代入感",
        evaluation_criteria: "趣味性、可读性、共鸣感",
        tone: "亲切且直率",
    },
    Persona {
        persona_type: PersonaType::LiteraryCritic,
        name: "文学评论家",
        description: "专业的文学评论家",
        evaluation_criteria: "文笔、主题意识、叙事结构、象征手法",
        tone: "严谨且学术",
    },
    Persona {
        persona_type: PersonaType::GenreEnthusiast,
        name: "类型小说迷",
        description: "特定类型小说的狂热爱好者",
        evaluation_criteria: "类型惯例、桥段运用、新颖度",
        tone: "热情且善于比较分析",
    },
    Persona {
        persona_type: PersonaType::Editor,
        name: "出版编辑",
        description: "出版社编辑",
        evaluation_criteria: "错别字、语法、句子结构、可读性",
        tone: "客观且务实",
    },
    Persona {
        persona_type: PersonaType::CommercialPublisher,
        name: "商业出版人",
        description: "商业视角的出版人",
        evaluation_criteria: "市场趋势、商业潜力、目标读者",
        tone: "商业导向且有战略眼光",
    },
    Persona {
        persona_type: PersonaType::FellowWriter,
        name: "同行作者",
        description: "同样在创作的作家同行",
        evaluation_criteria: "创作过程、作者意图、技术难点",
        tone: "温暖且鼓励",
    },
];
