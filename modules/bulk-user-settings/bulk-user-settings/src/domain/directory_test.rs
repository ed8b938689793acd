#[cfg(test)]
mod tests {
    use super::super::directory::{BusinessUnit, Directory, DirectoryFilter, DirectoryUser};
    use uuid::Uuid;

    fn unit(name: &str) -> BusinessUnit {
        BusinessUnit {
            business_unit_id: Uuid::new_v4(),
            name: name.to_owned(),
        }
    }

    fn member(name: &str, email: Option<&str>, unit: &BusinessUnit) -> DirectoryUser {
        DirectoryUser {
            user_id: Uuid::new_v4(),
            display_name: name.to_owned(),
            email: email.map(str::to_owned),
            business_unit_id: Some(unit.business_unit_id),
            business_unit_name: None,
        }
    }

    fn directory() -> (Directory, BusinessUnit, BusinessUnit) {
        let (sales, service) = (unit("Sales"), unit("Customer Service"));
        let users = vec![
            member("Alice Archer", Some("alice@contoso.com"), &sales),
            member("Bob Baker", Some("bob@fabrikam.com"), &service),
            member("Carol Cooper", None, &sales),
        ];
        let dir = Directory::new(users, vec![sales.clone(), service.clone()]);
        (dir, sales, service)
    }

    fn names(users: &[&DirectoryUser]) -> Vec<String> {
        users.iter().map(|u| u.display_name.clone()).collect()
    }

    #[test]
    fn test_empty_filter_keeps_everyone() {
        let (dir, _, _) = directory();

        assert!(DirectoryFilter::default().is_empty());
        assert_eq!(dir.filter(&DirectoryFilter::default()).len(), 3);

        let blank = DirectoryFilter {
            text: Some(String::new()),
            business_unit_id: None,
        };
        assert!(blank.is_empty());
        assert_eq!(dir.filter(&blank).len(), 3);
    }

    #[test]
    fn test_text_search_is_case_insensitive_over_name_email_and_unit() {
        let (dir, _, _) = directory();
        let search = |text: &str| {
            names(&dir.filter(&DirectoryFilter {
                text: Some(text.to_owned()),
                business_unit_id: None,
            }))
        };

        assert_eq!(search("ALICE"), vec!["Alice Archer"]);
        assert_eq!(search("fabrikam"), vec!["Bob Baker"]);
        assert_eq!(search("sales"), vec!["Alice Archer", "Carol Cooper"]);
        assert!(search("zed").is_empty());
    }

    #[test]
    fn test_business_unit_and_text_must_both_match() {
        let (dir, sales, _) = directory();

        let only_sales = DirectoryFilter {
            text: None,
            business_unit_id: Some(sales.business_unit_id),
        };
        assert_eq!(names(&dir.filter(&only_sales)), vec!["Alice Archer", "Carol Cooper"]);

        let both = DirectoryFilter {
            text: Some("carol".to_owned()),
            business_unit_id: Some(sales.business_unit_id),
        };
        assert_eq!(names(&dir.filter(&both)), vec!["Carol Cooper"]);

        let disjoint = DirectoryFilter {
            text: Some("bob".to_owned()),
            business_unit_id: Some(sales.business_unit_id),
        };
        assert!(dir.filter(&disjoint).is_empty());
    }

    #[test]
    fn test_business_unit_names_are_resolved_and_sorted() {
        let (dir, sales, service) = directory();

        assert_eq!(dir.users()[0].business_unit_name.as_deref(), Some("Sales"));
        assert_eq!(dir.users()[1].business_unit_name.as_deref(), Some("Customer Service"));

        let order: Vec<_> = dir.business_units().iter().map(|u| u.name.as_str()).collect();
        assert_eq!(order, vec!["Customer Service", "Sales"]);

        assert_eq!(dir.find_business_unit("sales"), Some(&sales));
        assert_eq!(
            dir.find_business_unit(&service.business_unit_id.to_string()),
            Some(&service)
        );
        assert_eq!(dir.find_business_unit("Marketing"), None);
    }

    #[test]
    fn test_user_without_unit_only_matches_without_unit_filter() {
        let sales = unit("Sales");
        let loner = DirectoryUser {
            user_id: Uuid::new_v4(),
            display_name: "Dana".to_owned(),
            email: None,
            business_unit_id: None,
            business_unit_name: None,
        };
        let dir = Directory::new(vec![loner.clone()], vec![sales.clone()]);

        assert_eq!(dir.users()[0].business_unit_name, None);
        assert_eq!(dir.users()[0].record().display_name, "Dana");
        assert!(dir
            .filter(&DirectoryFilter {
                text: None,
                business_unit_id: Some(sales.business_unit_id),
            })
            .is_empty());
    }
}
