//! Static lexicon of known Japanese-residue expressions.
//!
//! The table is built once at startup and never mutated. Entries keep their
//! definition order so scanner output is reproducible.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::annotation::Kind;

/// One lexicon row: a surface word with its classification and replacement
#[derive(Debug, Clone, Deserialize)]
pub struct LexiconEntry {
    pub word: String,
    pub kind: Kind,
    #[serde(default)]
    pub suggestion: String,
    #[serde(default)]
    pub note: String,
}

/// Immutable word table, iterated in definition order
#[derive(Debug, Clone)]
pub struct Lexicon {
    entries: Vec<LexiconEntry>,
}

#[derive(Deserialize)]
struct LexiconFile {
    entries: Vec<LexiconEntry>,
}

impl Lexicon {
    /// Build a lexicon from explicit entries, rejecting duplicate words
    pub fn new(entries: Vec<LexiconEntry>) -> Result<Self> {
        let mut seen = std::collections::HashSet::new();
        for entry in &entries {
            if entry.word.is_empty() {
                bail!("lexicon entry with empty word");
            }
            if !seen.insert(entry.word.as_str()) {
                bail!("duplicate lexicon word: {}", entry.word);
            }
        }
        Ok(Self { entries })
    }

    /// Load a user-supplied lexicon from a TOML file
    ///
    /// Format: a top-level `entries` array of tables with `word`, `kind`
    /// and optional `suggestion` / `note`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read lexicon file {}", path.display()))?;
        let file: LexiconFile = toml::from_str(&content)
            .with_context(|| format!("failed to parse lexicon file {}", path.display()))?;
        Self::new(file.entries)
    }

    pub fn entries(&self) -> &[LexiconEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Built-in table of Japanese-origin loanwords and calques
    pub fn builtin() -> Self {
        fn e(word: &str, kind: Kind, suggestion: &str, note: &str) -> LexiconEntry {
            LexiconEntry {
                word: word.to_string(),
                kind,
                suggestion: suggestion.to_string(),
                note: note.to_string(),
            }
        }
        use Kind::{Loanword, Translationese};

        let entries = vec![
            // 음식·요리·식생활
            e("오뎅", Loanword, "어묵", "일본어 おでん(oden)에서 온 말. '어묵'으로 순화 권장됨."),
            e("다마", Loanword, "당구 실력 또는 당구 공", "일본어 '타마(たま, 玉)'에서 온 말"),
            e("다마네기", Loanword, "양파", "일본어 たまねぎ에서 온 말."),
            e("다꾸앙", Loanword, "단무지", "일본어 たくあん에서 온 무절임."),
            e("다꽝", Loanword, "단무지", "'다꾸앙'의 변형 표기."),
            e("다대기", Loanword, "다진 양념, 다진 고추", "일본어 たたき에서 온 것으로 보는 속어."),
            e("고로케", Loanword, "감자고로케, 감자완자튀김", "일본어 コロッケ에서 온 말."),
            e("우동", Loanword, "가락국수", "일본식 국수 'うどん'에서 온 말."),
            e("짬뽕", Loanword, "해물 얼큰 국수", "일본식 'ちゃんぽん'에서 들어온 말로 알려짐."),
            e("와사비", Loanword, "고추냉이", "일본어 わさび에서 온 말."),
            e("사시미", Loanword, "회, 생선회", "일본어 さしみ에서 온 말."),
            e("쓰키다시", Loanword, "곁들이 안주", "일본어 つきだし(突き出し)에서 온 말."),
            e("소보로빵", Loanword, "곰보빵", "일본어 そぼろパン에서 온 제과 용어."),
            e("야끼만두", Loanword, "군만두", "일본어 '焼き(やき)'의 영향을 받은 표현."),
            e("낑깡", Loanword, "금귤, 동귤", "일본어 きんかん에서 온 말."),
            e("간식", Loanword, "새참", "일본어 かんしょく(間食)에서 온 말로 보는 견해."),
            e("소라색", Loanword, "하늘색", "일본어 空色(そらいろ)의 영향."),
            // 일상 속 속어·구어
            e("간지", Loanword, "느낌, 멋, 맵시", "일본어 感じ(かんじ)에서 온 속어."),
            e("노가다", Loanword, "막일, 현장 노동", "일본어 속어 'どかた'(토목 노동자)에서 온 비하적 표현."),
            e("무데뽀", Loanword, "막무가내", "일본어 無鉄砲(むてっぽう)에서 온 표현."),
            e("유도리", Loanword, "여유, 여유분, 융통성", "일본어 ゆとり에서 온 말."),
            e("찌라시", Loanword, "전단지, 광고지", "일본어 チラシ(ちらし)에서 온 말."),
            e("가오", Loanword, "체면, 얼굴", "일본어 顔(かお)에서 온 속어."),
            e("단도리", Loanword, "준비, 채비, 사전 조율", "일본어 段取り(だんどり)에서 온 말."),
            e("만땅", Loanword, "가득, 가득 참", "일본어 満タン(まんたん)에서 온 말."),
            e("와리깡", Loanword, "각자 계산, N빵", "일본어 割り勘(わりかん)에서 온 말."),
            e("뗑깡", Loanword, "생떼, 투정", "일본어 癲癇(てんかん)에서 온 속어로 보는 견해."),
            e("기스", Loanword, "흠집, 상처", "일본어 傷(きず)의 음이 변형된 표현으로 보는 견해."),
            e("쇼부", Loanword, "승부, 결판", "일본어 勝負(しょうぶ)에서 온 말."),
            e("곤조", Loanword, "고집, 근성", "일본어 根性(こんじょう)의 변형."),
            e("나가리", Loanword, "취소, 유찰, 허사", "일본어 流れ(ながれ)에서 온 말."),
            e("뽀록나다", Loanword, "들통나다, 드러나다", "일본어 露見(ろけん) 등에서 온 속어로 보는 견해."),
            e("후까시", Loanword, "허세, 허풍", "일본어 ふかし(부풀리기)에서 온 말."),
            e("이빠이", Loanword, "가득, 잔뜩", "일본어 一杯(いっぱい)에서 온 말."),
            e("구라", Loanword, "거짓말", "일본 속어에서 들어온 표현으로 보는 견해."),
            e("야미", Loanword, "암거래, 불법 거래", "일본어 闇(やみ, 어둠·암시장)에서 온 말."),
            e("똔똔", Loanword, "본전, 득실 없음", "일본 상업 속어에서 온 말로 보는 견해."),
            e("레자", Loanword, "인조가죽", "영어 leather의 일본식 발음 レザー에서 온 말."),
            e("함바", Loanword, "현장 식당", "일본어 飯場(はんば)에서 온 건설 현장 용어."),
            e("시마이", Loanword, "마무리, 끝, 정리", "일본어 仕舞い(しまい)에서 온 말."),
            // 생활용품·기타
            e("호치키스", Loanword, "스테이플러", "일본에서 상표명이 일반명사화된 'ホッチキス'에서 온 말."),
            e("구루마", Loanword, "손수레, 수레", "일본어 車(くるま)에서 온 표현."),
            e("잉꼬부부", Loanword, "원앙부부", "일본어 鸚哥(いんこ, 잉꼬)에서 온 말."),
            e("곤색", Loanword, "감색", "일본어 紺(こん) 발음에서 온 말."),
            // 공문서·행정·한자식 표현
            e("시말서", Translationese, "경위서", "일본어 始末書(しまつしょ)에서 온 행정 용어."),
            e("거래선", Translationese, "거래처", "일본식 한자어 取引先(とりひきさき)의 영향을 받은 표현."),
            e("수입선", Translationese, "수입처", "일본어 輸入先(ゆにゅうさき)의 영향을 받은 표현."),
            e("비상구", Translationese, "비상출구, 대피구", "일본어 非常口(ひじょうぐち)에서 온 한자식 조합."),
            e("가건물", Translationese, "임시 건물", "일본어 仮建物에서 온 표현으로 보는 견해."),
            e("가계약", Translationese, "임시 계약", "일본어 仮契約에서 온 말."),
            e("가불", Translationese, "선지급, 미리 지급", "일본어 仮払(かりばらい)와 연관된 표현으로 보는 견해."),
            e("대합실", Translationese, "맞이방, 대기실", "일본어 待合室(まちあいしつ)의 구조를 따른 말로 보는 견해."),
            e("숙박계", Translationese, "숙박 신고서, 숙박부", "일본식 '~계(屆)' 서식어(宿泊届)의 영향."),
            e("게양", Translationese, "올리다, 달다", "국어 순화 대상인 일본식 한자어 揭揚의 영향으로 지적되는 표현."),
        ];

        // Builtin table is duplicate-free by construction
        Self { entries }
    }
}
