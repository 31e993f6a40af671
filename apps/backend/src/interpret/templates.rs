use crate::domain::Lang;

/// Fixed strings for local interpretations in one language.
pub struct Templates {
    pub upright: &'static str,
    pub reversed: &'static str,
    /// Advice built from the solution card; `{m}` is its first meaning.
    solution: &'static str,
    /// Advice built from any other card; `{m}` is its first meaning.
    support: &'static str,
    pub summary: &'static str,
}

impl Templates {
    pub fn orientation(&self, is_reversed: bool) -> &'static str {
        if is_reversed {
            self.reversed
        } else {
            self.upright
        }
    }

    pub fn solution_advice(&self, meaning: &str) -> String {
        self.solution.replace("{m}", meaning)
    }

    pub fn support_advice(&self, meaning: &str) -> String {
        self.support.replace("{m}", meaning)
    }
}

static KO: Templates = Templates {
    upright: "정",
    reversed: "역",
    solution: "솔루션: {m}을(를) 오늘 작은 실행으로 시작하세요.",
    support: "보조: {m} 관점에서 한 가지 실험을 추가하세요.",
    summary: "흐름 요약: 8번 솔루션을 중심으로 현재 상황과 내외부 요인을 연결해 작게 시작하고, 반복적으로 보완하세요. 단정하지 말고 가설로 접근하세요.",
};

static EN: Templates = Templates {
    upright: "Upright",
    reversed: "Reversed",
    solution: "Solution: Start acting on {m} with one small step today.",
    support: "Support: Add one small experiment from the angle of {m}.",
    summary: "Flow summary: Center on the solution card in position 8, link the present situation with inner and outer factors, start small and refine as you go. Treat this as a hypothesis, not a verdict.",
};

static JA: Templates = Templates {
    upright: "正位置",
    reversed: "逆位置",
    solution: "ソリューション: {m}を今日の小さな一歩から始めましょう。",
    support: "サポート: {m}の観点から小さな実験を一つ加えましょう。",
    summary: "流れの要約: 8番のソリューションを軸に、現在の状況と内外の要因をつなげて小さく始め、少しずつ改善しましょう。断定せず仮説として捉えてください。",
};

static ZH: Templates = Templates {
    upright: "正位",
    reversed: "逆位",
    solution: "解决方案: 今天就以一个小行动开始实践{m}。",
    support: "辅助: 从{m}的角度增加一个小实验。",
    summary: "流程总结: 以第8张解决方案牌为核心，把当前状况与内外因素联系起来，从小处开始并不断调整。请把它当作假设而非定论。",
};

pub fn templates_for(lang: Lang) -> &'static Templates {
    match lang {
        Lang::Ko => &KO,
        Lang::En => &EN,
        Lang::Ja => &JA,
        Lang::Zh => &ZH,
    }
}

/// Orientation words in every supported language, longest first.
pub fn orientation_tokens() -> &'static [&'static str] {
    &[
        "정방향", "역방향", "정위치", "역위치", "正位置", "逆位置", "正位", "逆位",
        "upright", "reversed",
    ]
}
