// src/services/review_service_tests.rs
//
// Review and vote tests over a temporary SQLite database

#[cfg(test)]
mod tests {
    use crate::application::AppState;
    use crate::domain::{EventType, FilmId, NewReview, Operation, Review, ReviewEdit, ReviewId, UserId};
    use crate::error::AppError;
    use crate::services::test_support::{add_film, add_user, test_state};

    fn review(state: &AppState, user: UserId, film: FilmId, content: &str) -> Review {
        state
            .review_service
            .create(NewReview {
                content: content.to_string(),
                is_positive: true,
                user_id: user,
                film_id: film,
            })
            .unwrap()
    }

    fn review_ids(reviews: &[Review]) -> Vec<ReviewId> {
        reviews.iter().map(|r| r.id).collect()
    }

    // ========================================================================
    // REVIEW LIFECYCLE
    // ========================================================================

    #[test]
    fn test_create_update_remove_feed() {
        let (_dir, state) = test_state();
        let author = add_user(&state, "ann");
        let film = add_film(&state, "Stalker", 1979, &[2]);

        let created = review(&state, author.id, film.id, "Slow and hypnotic");
        assert_eq!(created.useful, 0);

        let updated = state
            .review_service
            .update(
                created.id,
                ReviewEdit { content: "Hypnotic".to_string(), is_positive: false },
            )
            .unwrap();
        assert_eq!(updated.content, "Hypnotic");
        assert!(!updated.is_positive);
        assert_eq!(updated.user_id, author.id);
        assert_eq!(updated.film_id, film.id);

        state.review_service.remove(created.id).unwrap();
        assert!(matches!(
            state.review_service.find_by_id(created.id),
            Err(AppError::NotFound(_))
        ));

        let feed = state.user_service.feed(author.id).unwrap();
        let entries: Vec<(EventType, Operation, i64)> = feed
            .iter()
            .map(|e| (e.event_type, e.operation, e.entity_id))
            .collect();
        assert_eq!(
            entries,
            vec![
                (EventType::Review, Operation::Add, created.id.get()),
                (EventType::Review, Operation::Update, created.id.get()),
                (EventType::Review, Operation::Remove, created.id.get()),
            ]
        );
    }

    #[test]
    fn test_create_requires_user_and_film() {
        let (_dir, state) = test_state();
        let author = add_user(&state, "ann");
        let film = add_film(&state, "Stalker", 1979, &[2]);

        let no_user = state.review_service.create(NewReview {
            content: "?".to_string(),
            is_positive: true,
            user_id: UserId(50),
            film_id: film.id,
        });
        let no_film = state.review_service.create(NewReview {
            content: "?".to_string(),
            is_positive: true,
            user_id: author.id,
            film_id: FilmId(50),
        });

        assert!(matches!(no_user, Err(AppError::NotFound(_))));
        assert!(matches!(no_film, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_unknown_review() {
        let (_dir, state) = test_state();
        let edit = ReviewEdit { content: "x".to_string(), is_positive: true };

        assert!(matches!(state.review_service.update(ReviewId(3), edit), Err(AppError::NotFound(_))));
        assert!(matches!(state.review_service.remove(ReviewId(3)), Err(AppError::NotFound(_))));
    }

    // ========================================================================
    // VOTES
    // ========================================================================

    #[test]
    fn test_vote_lifecycle() {
        let (_dir, state) = test_state();
        let author = add_user(&state, "ann");
        let voter = add_user(&state, "bob");
        let film = add_film(&state, "Stalker", 1979, &[2]);
        let id = review(&state, author.id, film.id, "Zone").id;
        let service = &state.review_service;

        service.add_vote(id, voter.id, true).unwrap();
        assert_eq!(service.find_by_id(id).unwrap().useful, 1);

        assert!(matches!(service.add_vote(id, voter.id, true), Err(AppError::Conflict(_))));
        assert!(matches!(service.add_vote(id, voter.id, false), Err(AppError::Conflict(_))));
        assert!(matches!(service.remove_vote(id, voter.id, false), Err(AppError::Conflict(_))));

        service.remove_vote(id, voter.id, true).unwrap();
        service.add_vote(id, voter.id, false).unwrap();
        assert_eq!(service.find_by_id(id).unwrap().useful, -1);

        // Only the three successful vote mutations reach the voter's feed
        let entries: Vec<(EventType, Operation, i64)> = state
            .user_service
            .feed(voter.id)
            .unwrap()
            .iter()
            .map(|e| (e.event_type, e.operation, e.entity_id))
            .collect();
        assert_eq!(
            entries,
            vec![
                (EventType::Vote, Operation::Add, id.get()),
                (EventType::Vote, Operation::Remove, id.get()),
                (EventType::Vote, Operation::Add, id.get()),
            ]
        );
    }

    #[test]
    fn test_vote_add_then_remove_records_two_feed_entries() {
        let (_dir, state) = test_state();
        let author = add_user(&state, "ann");
        let voter = add_user(&state, "bob");
        let film = add_film(&state, "Mirror", 1975, &[2]);
        let id = review(&state, author.id, film.id, "Memory").id;

        state.review_service.add_vote(id, voter.id, true).unwrap();
        state.review_service.remove_vote(id, voter.id, true).unwrap();

        let feed = state.user_service.feed(voter.id).unwrap();
        assert_eq!(feed.len(), 2);
        assert!(feed.iter().all(|e| e.user_id == voter.id && e.entity_id == id.get()));

        // The author's feed only holds the review itself
        assert_eq!(state.user_service.feed(author.id).unwrap().len(), 1);
    }

    #[test]
    fn test_vote_requires_review_and_user() {
        let (_dir, state) = test_state();
        let author = add_user(&state, "ann");
        let film = add_film(&state, "Stalker", 1979, &[2]);
        let id = review(&state, author.id, film.id, "Zone").id;

        assert!(matches!(
            state.review_service.add_vote(ReviewId(99), author.id, true),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            state.review_service.add_vote(id, UserId(99), true),
            Err(AppError::NotFound(_))
        ));
    }

    // ========================================================================
    // LISTING
    // ========================================================================

    #[test]
    fn test_find_by_film_orders_by_usefulness() {
        let (_dir, state) = test_state();
        let users: Vec<_> = (0..3).map(|i| add_user(&state, &format!("u{}", i))).collect();
        let film = add_film(&state, "Stalker", 1979, &[2]);
        let other = add_film(&state, "Mirror", 1975, &[2]);

        let first = review(&state, users[0].id, film.id, "first").id;
        let second = review(&state, users[1].id, film.id, "second").id;
        let third = review(&state, users[2].id, film.id, "third").id;
        let elsewhere = review(&state, users[0].id, other.id, "elsewhere").id;

        state.review_service.add_vote(third, users[0].id, true).unwrap();
        state.review_service.add_vote(third, users[1].id, true).unwrap();
        state.review_service.add_vote(first, users[2].id, false).unwrap();

        let for_film = state.review_service.find_by_film(Some(film.id), None).unwrap();
        assert_eq!(review_ids(&for_film), vec![third, second, first]);

        let top_one = state.review_service.find_by_film(Some(film.id), Some(1)).unwrap();
        assert_eq!(review_ids(&top_one), vec![third]);

        let all = state.review_service.find_by_film(None, None).unwrap();
        assert_eq!(review_ids(&all), vec![third, second, elsewhere, first]);
    }

    #[test]
    fn test_find_by_film_rejects_bad_input() {
        let (_dir, state) = test_state();

        assert!(matches!(
            state.review_service.find_by_film(None, Some(-1)),
            Err(AppError::InvalidArgument(_))
        ));
        assert!(matches!(
            state.review_service.find_by_film(Some(FilmId(8)), None),
            Err(AppError::NotFound(_))
        ));
    }
}
