use crate::{include_res, res::escape};

use super::Profile;

pub fn profile_cards(profiles: &[Profile]) -> String {
    if profiles.is_empty() {
        return include_res!(str, "/pages/profiles/empty.html").to_owned();
    }

    profiles.iter().map(profile_card).collect()
}

fn profile_card(profile: &Profile) -> String {
    let badge = if profile.is_verified {
        include_res!(str, "/pages/profiles/verified.html")
    } else {
        ""
    };

    let icebreaker = if profile.icebreaker_response.is_empty() {
        String::new()
    } else {
        include_res!(str, "/pages/profiles/icebreaker.html")
            .replace("{answer}", &escape(&profile.icebreaker_response))
    };

    let interests = if profile.interests.is_empty() {
        String::new()
    } else {
        let tags: String = profile
            .interest_list()
            .map(|i| format!(r#"<span class="interest-tag">{}</span>"#, escape(i)))
            .collect();
        format!(r#"<div class="profile-interests">{tags}</div>"#)
    };

    include_res!(str, "/pages/profiles/card.html")
        .replace("{badge}", badge)
        .replace("{icebreaker}", &icebreaker)
        .replace("{interests}", &interests)
        .replace("{points}", &profile.points.to_string())
        .replace("{initial}", &escape(&profile.initial().to_string()))
        .replace("{name}", &escape(&profile.name))
        .replace("{age}", &profile.age.to_string())
        .replace("{airport}", &escape(&profile.airport))
        .replace("{terminal}", &escape(&profile.terminal))
        .replace("{gate}", &escape(&profile.gate))
        .replace("{flight_number}", &escape(&profile.flight_number))
        .replace("{departure_time}", &escape(&profile.departure_time))
        .replace("{destination}", &escape(&profile.destination))
        .replace("{travel_purpose}", &escape(&profile.travel_purpose))
        .replace("{bio}", &escape(&profile.bio))
        .replace("{timestamp}", &escape(&profile.timestamp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::store::tests::traveler;

    #[test]
    fn renders_escaped_fields_and_tags() {
        let mut new = traveler("<Ada>", "SFO", "Terminal 1");
        new.bio = "likes {name} & {bio}".into();
        let mut profile = Profile::from_new(new, "2024-05-01 10:00:00".into());
        profile.is_verified = true;

        let html = profile_cards(&[profile]);
        assert!(html.contains("&lt;Ada&gt;"));
        assert!(!html.contains("<Ada>"));
        assert!(html.contains("likes &#123;name&#125; &amp; &#123;bio&#125;"));
        assert!(html.contains(r#"<span class="interest-tag">Food &amp; Dining</span>"#));
        assert!(html.contains("verification-badge"));
        assert!(html.contains("100 pts"));
    }

    #[test]
    fn empty_list_invites_first_check_in() {
        assert!(profile_cards(&[]).contains("No travelers yet"));
    }
}
