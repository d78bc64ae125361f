// BSD 3-Clause License
//
// Copyright (c) 2025, BlackPortal ○
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice, this
//    list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
//    this list of conditions and the following disclaimer in the documentation
//    and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its
//    contributors may be used to endorse or promote products derived from
//    this software without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
// DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
// FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
// DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
// SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
// CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
// OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

//! Fixed advisory text shown alongside a prediction.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tip {
    pub advice: &'static str,
    pub aside: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub title: &'static str,
    pub tips: [Tip; 5],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bundle {
    pub headline: &'static str,
    pub note: &'static str,
    pub sections: [Section; 4],
}

impl fmt::Display for Bundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: {}", self.headline, self.note)?;
        for section in &self.sections {
            writeln!(f)?;
            writeln!(f, "{}", section.title)?;
            for (i, tip) in section.tips.iter().enumerate() {
                writeln!(f, "  {}. {} ({})", i + 1, tip.advice, tip.aside)?;
            }
        }
        Ok(())
    }
}

const fn tip(advice: &'static str, aside: &'static str) -> Tip {
    Tip { advice, aside }
}

pub static DEPRESSED: Bundle = Bundle {
    headline: "Depressed",
    note: "Immediate support is recommended",
    sections: [
        Section {
            title: "Study-Life Balance",
            tips: [
                tip("Plan your day: helps manage time efficiently.", "Like a daily cheat sheet for life!"),
                tip("Take short breaks: prevents mental fatigue.", "Stretch, walk, or dance a little!"),
                tip("Prioritize tasks: makes tasks manageable.", "Big scary homework = tiny bites!"),
                tip("Avoid overcommitment: reduces stress triggers.", "Say \"no\" without guilt!"),
                tip("Track mood/journal: monitor improvement.", "Your brain will thank you!"),
            ],
        },
        Section {
            title: "Exercise & Healthy Diet",
            tips: [
                tip("Exercise daily: improves mood.", "Even a 10-min dance counts!"),
                tip("Eat balanced meals: supports brain health.", "Veggies = brain fuel!"),
                tip("Stay hydrated: prevents fatigue.", "Water > soda, your brain will love it!"),
                tip("Reduce junk/sugar: avoids mood swings.", "Candy is fun, too much = cranky!"),
                tip("Include protein/vitamins: sustains energy.", "Eggs, nuts = superpowers!"),
            ],
        },
        Section {
            title: "Sleep & Rest",
            tips: [
                tip("Sleep 7-8 hours: supports mental health.", "Sleep = recharge button!"),
                tip("Keep consistent sleep times: regulates rhythm.", "Body loves routines!"),
                tip("Reduce screen time before bed: improves sleep.", "No phone zombies!"),
                tip(
                    "Comfortable sleep environment: reduces disturbances.",
                    "Cozy bed = happy mind!",
                ),
                tip("Relax before sleep: helps fall asleep.", "Read, chill, meditate!"),
            ],
        },
        Section {
            title: "Social Motivation",
            tips: [
                tip("Connect with friends/family: social support.", "Call or chat = mood boost!"),
                tip(
                    "Participate in hobbies/groups: boosts belonging.",
                    "Fun + friends = happy vibes!",
                ),
                tip("Seek professional help: therapy if needed.", "Smart, not weak!"),
                tip(
                    "Engage in laughter/light activities: reduces stress.",
                    "Laugh like nobody's watching!",
                ),
                tip("Avoid isolation: maintain interactions.", "Don't ghost yourself!"),
            ],
        },
    ],
};

pub static NOT_DEPRESSED: Bundle = Bundle {
    headline: "Not Depressed",
    note: "Continue maintaining wellbeing",
    sections: [
        Section {
            title: "Study-Life Balance",
            tips: [
                tip(
                    "Keep balanced daily schedule: mental stability.",
                    "Like pizza slices: everything gets some time!",
                ),
                tip("Take regular breaks: sustains energy.", "Even superheroes rest!"),
                tip("Set achievable academic goals: prevents stress.", "Small wins = big smiles!"),
                tip(
                    "Avoid procrastination: reduces last-minute panic.",
                    "Beat the panic monster!",
                ),
                tip("Stay organized: maintain control.", "Clutter-free = brain happy!"),
            ],
        },
        Section {
            title: "Exercise & Healthy Diet",
            tips: [
                tip(
                    "Regular physical activity: keeps mind & body healthy.",
                    "Move it or lose it!",
                ),
                tip("Eat healthy, balanced meals: brain + energy.", "Fuel your brain like a boss!"),
                tip("Stay hydrated: focus + prevents fatigue.", "Water = brain juice!"),
                tip("Limit processed/sugar: prevents mood swings.", "Too much candy = grumpy alert!"),
                tip(
                    "Diet for energy & immunity: long-term wellbeing.",
                    "Strong body = happy life!",
                ),
            ],
        },
        Section {
            title: "Sleep & Rest",
            tips: [
                tip("Sleep 7-8 hours: mental & physical health.", "Recharge your brain!"),
                tip("Consistent sleep/wake times: steady energy.", "Routine = secret power!"),
                tip(
                    "Reduce screens 30-60 min before bed: sleep quality.",
                    "Bye-bye phone zombies!",
                ),
                tip("Calm, comfy sleep environment: restful sleep.", "Cozy bed = happy mind!"),
                tip(
                    "Relaxing bedtime routine: prepare mind for sleep.",
                    "Read, chill, meditate!",
                ),
            ],
        },
        Section {
            title: "Social Motivation",
            tips: [
                tip("Stay connected: social support.", "Talking keeps spirits high!"),
                tip("Social hobbies/clubs: sense of belonging.", "New friends = new energy!"),
                tip("Share feelings openly: emotional resilience.", "Better out than bottled up!"),
                tip(
                    "Light-hearted activities: reduces stress.",
                    "Laugh like nobody's watching!",
                ),
                tip(
                    "Participate in community/group learning: engagement & wellbeing.",
                    "Fun multiplies with friends!",
                ),
            ],
        },
    ],
};

/// Bundle for a predicted label: `1` is depressed, anything else is not.
pub fn recommend(label: u8) -> &'static Bundle {
    if label == 1 { &DEPRESSED } else { &NOT_DEPRESSED }
}
